//! User API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{CreateUserRequest, UpdateUserRequest, User, UserListing};
use crate::panels::UsersPanel;
use crate::AppState;

/// GET /api/users - List all users with their role labels.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<UserListing>> {
    let users = UsersPanel::new(state.store.as_ref()).list().await?;
    success(users.into_iter().map(UserListing::from).collect())
}

/// GET /api/users/:id - Get a single user.
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    success(UsersPanel::new(state.store.as_ref()).get(&id).await?)
}

/// POST /api/users - Create a user with a unique email.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<User> {
    success(UsersPanel::new(state.store.as_ref()).create(&request).await?)
}

/// PUT /api/users/:id - Update a user.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<User> {
    success(UsersPanel::new(state.store.as_ref()).update(&id, &request).await?)
}

/// DELETE /api/users/:id - Delete a user.
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    UsersPanel::new(state.store.as_ref()).delete(&id).await?;
    success(())
}
