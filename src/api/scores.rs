//! Score API endpoints, nested under a match.

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::{success, ApiResult};
use crate::identity::RequestIdentity;
use crate::models::{AddScoreRequest, Score, UpdateScoreRequest};
use crate::panels::ScoresPanel;
use crate::AppState;

/// GET /api/matches/:id/scores - Scores of a match, oldest first.
pub async fn list_scores(
    State(state): State<AppState>,
    Extension(identity): Extension<RequestIdentity>,
    Path(match_id): Path<String>,
) -> ApiResult<Vec<Score>> {
    success(
        ScoresPanel::new(state.store.as_ref(), &identity, &match_id)
            .list()
            .await?,
    )
}

/// POST /api/matches/:id/scores - Add a score.
pub async fn add_score(
    State(state): State<AppState>,
    Extension(identity): Extension<RequestIdentity>,
    Path(match_id): Path<String>,
    Json(request): Json<AddScoreRequest>,
) -> ApiResult<Score> {
    success(
        ScoresPanel::new(state.store.as_ref(), &identity, &match_id)
            .add(&request)
            .await?,
    )
}

/// PUT /api/matches/:id/scores/:score_id - Change side or points.
pub async fn update_score(
    State(state): State<AppState>,
    Extension(identity): Extension<RequestIdentity>,
    Path((match_id, score_id)): Path<(String, String)>,
    Json(request): Json<UpdateScoreRequest>,
) -> ApiResult<Score> {
    success(
        ScoresPanel::new(state.store.as_ref(), &identity, &match_id)
            .update(&score_id, &request)
            .await?,
    )
}

/// DELETE /api/matches/:id/scores/:score_id - Delete a score.
pub async fn delete_score(
    State(state): State<AppState>,
    Extension(identity): Extension<RequestIdentity>,
    Path((match_id, score_id)): Path<(String, String)>,
) -> ApiResult<()> {
    ScoresPanel::new(state.store.as_ref(), &identity, &match_id)
        .delete(&score_id)
        .await?;
    success(())
}
