//! Dashboard figures.

use super::UsersPanel;
use crate::errors::AppError;
use crate::models::{DashboardStats, Role};
use crate::store::DocumentStore;

/// Count all users, admins and referees.
pub async fn dashboard_stats(store: &dyn DocumentStore) -> Result<DashboardStats, AppError> {
    let users = UsersPanel::new(store).list().await?;
    let count_role = |role: Role| users.iter().filter(|u| u.role.as_ref() == Some(&role)).count();

    Ok(DashboardStats {
        total_users: users.len(),
        admin_count: count_role(Role::Admin),
        referee_count: count_role(Role::Referee),
    })
}
