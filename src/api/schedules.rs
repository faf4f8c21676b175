//! Schedule API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{FormOption, SaveScheduleRequest, Schedule, ScheduleListing};
use crate::panels::SchedulesPanel;
use crate::AppState;

/// GET /api/schedules - List all schedules with their status badges.
pub async fn list_schedules(State(state): State<AppState>) -> ApiResult<Vec<ScheduleListing>> {
    let schedules = SchedulesPanel::new(state.store.as_ref()).list().await?;
    success(schedules.into_iter().map(ScheduleListing::from).collect())
}

/// GET /api/schedules/options - Schedule choices for the match form.
pub async fn schedule_options(State(state): State<AppState>) -> ApiResult<Vec<FormOption>> {
    success(SchedulesPanel::new(state.store.as_ref()).options().await?)
}

/// GET /api/schedules/:id - Get a single schedule.
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Schedule> {
    success(SchedulesPanel::new(state.store.as_ref()).get(&id).await?)
}

/// POST /api/schedules - Create a schedule.
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(request): Json<SaveScheduleRequest>,
) -> ApiResult<Schedule> {
    success(SchedulesPanel::new(state.store.as_ref()).create(&request).await?)
}

/// PUT /api/schedules/:id - Save the schedule form over an existing schedule.
pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SaveScheduleRequest>,
) -> ApiResult<Schedule> {
    success(
        SchedulesPanel::new(state.store.as_ref())
            .update(&id, &request)
            .await?,
    )
}

/// DELETE /api/schedules/:id - Delete a schedule.
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    SchedulesPanel::new(state.store.as_ref()).delete(&id).await?;
    success(())
}
