//! Match API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{FormOption, Match, SaveMatchRequest};
use crate::panels::MatchesPanel;
use crate::AppState;

/// GET /api/matches - List all matches.
pub async fn list_matches(State(state): State<AppState>) -> ApiResult<Vec<Match>> {
    success(MatchesPanel::new(state.store.as_ref()).list().await?)
}

/// GET /api/matches/options - Match choices for the schedule form.
pub async fn match_options(State(state): State<AppState>) -> ApiResult<Vec<FormOption>> {
    success(MatchesPanel::new(state.store.as_ref()).options().await?)
}

/// GET /api/matches/:id - Get a single match.
pub async fn get_match(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Match> {
    success(MatchesPanel::new(state.store.as_ref()).get(&id).await?)
}

/// POST /api/matches - Create a match.
pub async fn create_match(
    State(state): State<AppState>,
    Json(request): Json<SaveMatchRequest>,
) -> ApiResult<Match> {
    success(MatchesPanel::new(state.store.as_ref()).create(&request).await?)
}

/// PUT /api/matches/:id - Save the match form over an existing match.
pub async fn update_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SaveMatchRequest>,
) -> ApiResult<Match> {
    success(MatchesPanel::new(state.store.as_ref()).update(&id, &request).await?)
}

/// DELETE /api/matches/:id - Delete a match.
pub async fn delete_match(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    MatchesPanel::new(state.store.as_ref()).delete(&id).await?;
    success(())
}
