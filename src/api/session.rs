//! Session endpoints. These sit outside the admin gate.

use axum::{extract::State, Extension};

use super::{success, ApiResult};
use crate::identity::{CurrentUser, RequestIdentity};
use crate::panels::{SessionInfo, SessionPanel};
use crate::AppState;

/// GET /api/session - Verify the caller and report their role.
pub async fn check_session(
    State(state): State<AppState>,
    Extension(identity): Extension<RequestIdentity>,
) -> ApiResult<SessionInfo> {
    let panel = SessionPanel::new(state.store.as_ref(), &identity, &state.session_cache);
    success(panel.check().await?)
}

/// GET /api/session/cached - Last known signed-in user, unverified.
pub async fn cached_session(
    State(state): State<AppState>,
    Extension(identity): Extension<RequestIdentity>,
) -> ApiResult<Option<CurrentUser>> {
    let panel = SessionPanel::new(state.store.as_ref(), &identity, &state.session_cache);
    success(panel.cached().await)
}

/// DELETE /api/session - Sign out.
pub async fn sign_out(
    State(state): State<AppState>,
    Extension(identity): Extension<RequestIdentity>,
) -> ApiResult<()> {
    let panel = SessionPanel::new(state.store.as_ref(), &identity, &state.session_cache);
    panel.sign_out().await;
    success(())
}

/// POST /api/session/setup-admin - Grant the caller the admin role.
pub async fn setup_admin(
    State(state): State<AppState>,
    Extension(identity): Extension<RequestIdentity>,
) -> ApiResult<SessionInfo> {
    let panel = SessionPanel::new(state.store.as_ref(), &identity, &state.session_cache);
    success(panel.setup_admin().await?)
}
