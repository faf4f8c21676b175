//! Dashboard and version endpoints.

use axum::{extract::State, Json};

use super::{success, ApiResult};
use crate::models::{AppVersion, DashboardStats, UpdateVersionRequest};
use crate::panels::{current_version, dashboard_stats, publish_version};
use crate::AppState;

/// GET /api/dashboard - User counts.
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    success(dashboard_stats(state.store.as_ref()).await?)
}

/// GET /api/version - Currently published app version.
pub async fn get_version(State(state): State<AppState>) -> ApiResult<AppVersion> {
    success(current_version(state.store.as_ref()).await?)
}

/// PUT /api/version - Publish a new app version.
pub async fn update_version(
    State(state): State<AppState>,
    Json(request): Json<UpdateVersionRequest>,
) -> ApiResult<AppVersion> {
    success(publish_version(state.store.as_ref(), &request.version).await?)
}
