//! Session check, admin gate decisions and first-time admin setup.

use serde::Serialize;
use serde_json::json;

use super::{object, UsersPanel};
use crate::errors::AppError;
use crate::identity::{CurrentUser, IdentityGateway, SessionCache};
use crate::models::{timestamp_now, Role, User, UserStatus};
use crate::store::{Collection, DocumentStore};

pub const SIGN_IN_REQUIRED: &str = "請先使用您的帳號登入";
pub const NOT_ADMIN: &str = "您沒有管理員權限";
pub const ADMIN_NOT_SET_UP: &str = "您已成功登入，但尚未設置管理員權限。請設置為管理員。";
const ALREADY_ADMIN: &str = "您的帳號已經是管理員";
const ROLE_CHECK_FAILED: &str = "驗證權限時發生錯誤";
const SETUP_FAILED: &str = "設置管理員帳號時出錯";
const DEFAULT_ADMIN_NICKNAME: &str = "管理員";

/// Who is signed in and what they may do.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub user: CurrentUser,
    pub role: Option<Role>,
    pub is_admin: bool,
}

pub struct SessionPanel<'a> {
    store: &'a dyn DocumentStore,
    identity: &'a dyn IdentityGateway,
    cache: &'a SessionCache,
}

impl<'a> SessionPanel<'a> {
    pub fn new(
        store: &'a dyn DocumentStore,
        identity: &'a dyn IdentityGateway,
        cache: &'a SessionCache,
    ) -> Self {
        Self {
            store,
            identity,
            cache,
        }
    }

    fn signed_in(&self) -> Result<CurrentUser, AppError> {
        self.identity
            .current_user()
            .ok_or_else(|| AppError::Unauthorized(SIGN_IN_REQUIRED.to_string()))
    }

    async fn user_record(&self, user: &CurrentUser) -> Result<Option<User>, AppError> {
        UsersPanel::new(self.store)
            .find(&user.id)
            .await
            .map_err(|e| match e {
                AppError::Forbidden(_) => e,
                _ => AppError::Internal(ROLE_CHECK_FAILED.to_string()),
            })
    }

    /// Authoritative session check. Refreshes the cached snapshot.
    pub async fn check(&self) -> Result<SessionInfo, AppError> {
        let user = self.signed_in()?;
        if let Err(e) = self.cache.store(&user).await {
            tracing::warn!("Failed to cache session for {}: {}", user.id, e);
        }

        let role = self.user_record(&user).await?.and_then(|u| u.role);
        Ok(SessionInfo {
            is_admin: role == Some(Role::Admin),
            user,
            role,
        })
    }

    /// The caller's own snapshot, for optimistic restoration only.
    pub async fn cached(&self) -> Option<CurrentUser> {
        let user = self.identity.current_user()?;
        self.cache.load(&user.id).await
    }

    /// Drop the caller's snapshot. Signed-out callers have nothing to clear.
    pub async fn sign_out(&self) {
        if let Some(user) = self.identity.current_user() {
            self.cache.clear(&user.id).await;
            tracing::info!("Session cache cleared for {}", user.id);
        }
    }

    /// Admit the caller only if their user record has the admin role.
    pub async fn authorize_admin(&self) -> Result<User, AppError> {
        let user = self.signed_in()?;
        match self.user_record(&user).await? {
            Some(record) if record.role == Some(Role::Admin) => Ok(record),
            Some(_) => Err(AppError::Forbidden(NOT_ADMIN.to_string())),
            None => Err(AppError::Forbidden(ADMIN_NOT_SET_UP.to_string())),
        }
    }

    /// Grant the admin role to the signed-in caller's own record.
    pub async fn setup_admin(&self) -> Result<SessionInfo, AppError> {
        let user = self.signed_in()?;
        if let Some(record) = self.user_record(&user).await? {
            if record.role == Some(Role::Admin) {
                return Err(AppError::Validation(ALREADY_ADMIN.to_string()));
            }
        }

        let mut fields = object(json!({
            "nickname": user.display_name.as_deref().unwrap_or(DEFAULT_ADMIN_NICKNAME),
            "role": Role::Admin,
            "status": UserStatus::Active,
            "createdAt": timestamp_now(),
        }));
        if let Some(email) = &user.email {
            fields.insert("email".to_string(), json!(email));
        }

        self.store
            .set_record(&Collection::Users.into(), &user.id, fields, true)
            .await
            .map_err(|e| AppError::write_failed(SETUP_FAILED, e))?;
        tracing::info!("User {} set up as admin", user.id);

        self.check().await
    }
}
