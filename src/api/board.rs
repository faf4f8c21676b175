//! Match board endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::{success, ApiResult};
use crate::board::{BoardError, BoardView};
use crate::errors::AppError;
use crate::AppState;

/// GET /api/board - Grouped board as a view model.
pub async fn get_board(State(state): State<AppState>) -> ApiResult<BoardView> {
    success(state.board.load().await?)
}

/// GET /admin/board - Grouped board as console markup.
///
/// When matches fail after schedules arrived, the headers already built are
/// still rendered, with a 503 status.
pub async fn render_board(State(state): State<AppState>) -> Result<Response, AppError> {
    match state.board.load().await {
        Ok(view) => Ok(Html(state.renderer.render(&view)?).into_response()),
        Err(BoardError::Matches { source, partial }) => {
            tracing::error!("Rendering partial board: {}", source);
            let html = state.renderer.render(&partial)?;
            Ok((StatusCode::SERVICE_UNAVAILABLE, Html(html)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}
