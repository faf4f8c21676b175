//! Schedule management panel.

use serde_json::json;

use super::{normalize_timestamp, object};
use crate::board::SCHEDULES_FETCH_FAILED;
use crate::errors::AppError;
use crate::models::{timestamp_now, FormOption, Match, SaveScheduleRequest, Schedule};
use crate::store::{decode_all, Collection, CollectionPath, DocumentStore, Fields};

const NOT_FOUND: &str = "找不到該賽程數據";
const MATCH_REQUIRED: &str = "請選擇所屬比賽";
const UNKNOWN_MATCH: &str = "找不到所選比賽";
const MATCH_LOOKUP_FAILED: &str = "獲取比賽數據失敗，請稍後再試";
const CREATE_FAILED: &str = "創建賽程失敗，請稍後再試";
const UPDATE_FAILED: &str = "更新賽程失敗，請稍後再試";
const DELETE_FAILED: &str = "刪除賽程失敗，請稍後再試";

/// Schedules collection operations.
pub struct SchedulesPanel<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> SchedulesPanel<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    fn path() -> CollectionPath {
        Collection::Schedules.into()
    }

    pub async fn list(&self) -> Result<Vec<Schedule>, AppError> {
        self.store
            .fetch_all(Collection::Schedules)
            .await
            .and_then(decode_all)
            .map_err(|e| AppError::fetch_failed(SCHEDULES_FETCH_FAILED, e))
    }

    pub async fn get(&self, id: &str) -> Result<Schedule, AppError> {
        let doc = self
            .store
            .fetch_record(&Self::path(), id)
            .await
            .map_err(|e| AppError::fetch_failed(SCHEDULES_FETCH_FAILED, e))?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
        doc.decode()
            .map_err(|e| AppError::fetch_failed(SCHEDULES_FETCH_FAILED, e))
    }

    /// Schedule choices for the match form, labelled `matchName - round`.
    pub async fn options(&self) -> Result<Vec<FormOption>, AppError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .map(|s| FormOption {
                label: s.option_label(),
                id: s.id,
            })
            .collect())
    }

    /// Build the stored fields. A schedule must name an existing match, whose
    /// `name` becomes the schedule's `matchName`.
    async fn form_fields(&self, request: &SaveScheduleRequest) -> Result<Fields, AppError> {
        let match_id = request.match_id.trim();
        if match_id.is_empty() {
            return Err(AppError::Validation(MATCH_REQUIRED.to_string()));
        }

        let doc = self
            .store
            .fetch_record(&Collection::Matches.into(), match_id)
            .await
            .map_err(|e| AppError::fetch_failed(MATCH_LOOKUP_FAILED, e))?
            .ok_or_else(|| AppError::Validation(UNKNOWN_MATCH.to_string()))?;
        let linked: Match = doc
            .decode()
            .map_err(|e| AppError::fetch_failed(MATCH_LOOKUP_FAILED, e))?;

        let mut fields = object(json!({
            "matchId": match_id,
            "matchName": linked.name.unwrap_or_default(),
            "status": request.status,
            "updatedAt": timestamp_now(),
        }));
        let optional = [
            ("round", request.round.clone()),
            ("location", request.location.clone()),
            ("time", normalize_timestamp(request.time.as_deref())?),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                fields.insert(key.to_string(), json!(value));
            }
        }
        Ok(fields)
    }

    pub async fn create(&self, request: &SaveScheduleRequest) -> Result<Schedule, AppError> {
        let mut fields = self.form_fields(request).await?;
        fields.insert("createdAt".to_string(), json!(timestamp_now()));

        let id = self
            .store
            .create_record(&Self::path(), fields)
            .await
            .map_err(|e| AppError::write_failed(CREATE_FAILED, e))?;
        tracing::info!("Created schedule {}", id);

        self.get(&id).await
    }

    pub async fn update(&self, id: &str, request: &SaveScheduleRequest) -> Result<Schedule, AppError> {
        let fields = self.form_fields(request).await?;

        self.store
            .update_record(&Self::path(), id, fields)
            .await
            .map_err(|e| AppError::write_failed(UPDATE_FAILED, e))?;

        self.get(id).await
    }

    /// Delete a schedule. Matches that reference it drop out of the board.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store
            .delete_record(&Self::path(), id)
            .await
            .map_err(|e| AppError::write_failed(DELETE_FAILED, e))?;
        tracing::info!("Deleted schedule {}", id);
        Ok(())
    }
}
