//! Match management panel.

use serde_json::json;

use super::{normalize_timestamp, object};
use crate::board::MATCHES_FETCH_FAILED;
use crate::errors::AppError;
use crate::models::{timestamp_now, FormOption, Match, SaveMatchRequest, Schedule};
use crate::store::{decode_all, Collection, CollectionPath, DocumentStore, Fields};

const NOT_FOUND: &str = "找不到該比賽數據";
const NAME_REQUIRED: &str = "請輸入比賽名稱";
const UNKNOWN_SCHEDULE: &str = "找不到所選賽程";
const SCHEDULE_LOOKUP_FAILED: &str = "獲取賽程數據失敗，請稍後再試";
const CREATE_FAILED: &str = "創建比賽失敗，請稍後再試";
const UPDATE_FAILED: &str = "更新比賽失敗，請稍後再試";
const DELETE_FAILED: &str = "刪除比賽失敗，請稍後再試";

/// Matches collection operations.
pub struct MatchesPanel<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> MatchesPanel<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    fn path() -> CollectionPath {
        Collection::Matches.into()
    }

    pub async fn list(&self) -> Result<Vec<Match>, AppError> {
        self.store
            .fetch_all(Collection::Matches)
            .await
            .and_then(decode_all)
            .map_err(|e| AppError::fetch_failed(MATCHES_FETCH_FAILED, e))
    }

    pub async fn find(&self, id: &str) -> Result<Option<Match>, AppError> {
        let doc = self
            .store
            .fetch_record(&Self::path(), id)
            .await
            .map_err(|e| AppError::fetch_failed(MATCHES_FETCH_FAILED, e))?;
        doc.map(|d| d.decode())
            .transpose()
            .map_err(|e| AppError::fetch_failed(MATCHES_FETCH_FAILED, e))
    }

    pub async fn get(&self, id: &str) -> Result<Match, AppError> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    /// Match choices for the schedule form.
    pub async fn options(&self) -> Result<Vec<FormOption>, AppError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .map(|m| FormOption {
                label: m.name.unwrap_or_default(),
                id: m.id,
            })
            .collect())
    }

    /// Build the stored fields. The owning schedule's label is copied into
    /// `tournamentName`; an empty `tournamentId` unlinks the match.
    async fn form_fields(&self, request: &SaveMatchRequest) -> Result<Fields, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::Validation(NAME_REQUIRED.to_string()));
        }

        let tournament_id = request
            .tournament_id
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        let tournament_name = if tournament_id.is_empty() {
            String::new()
        } else {
            let doc = self
                .store
                .fetch_record(&Collection::Schedules.into(), tournament_id)
                .await
                .map_err(|e| AppError::fetch_failed(SCHEDULE_LOOKUP_FAILED, e))?
                .ok_or_else(|| AppError::Validation(UNKNOWN_SCHEDULE.to_string()))?;
            let schedule: Schedule = doc
                .decode()
                .map_err(|e| AppError::fetch_failed(SCHEDULE_LOOKUP_FAILED, e))?;
            schedule.option_label()
        };

        let mut fields = object(json!({
            "name": request.name.trim(),
            "type": request.kind,
            "status": request.status,
            "tournamentId": tournament_id,
            "tournamentName": tournament_name,
            "updatedAt": timestamp_now(),
        }));
        let optional = [
            ("bluePlayer", request.blue_player.clone()),
            ("redPlayer", request.red_player.clone()),
            ("description", request.description.clone()),
            ("startDate", normalize_timestamp(request.start_date.as_deref())?),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                fields.insert(key.to_string(), json!(value));
            }
        }
        Ok(fields)
    }

    pub async fn create(&self, request: &SaveMatchRequest) -> Result<Match, AppError> {
        let mut fields = self.form_fields(request).await?;
        fields.insert("createdAt".to_string(), json!(timestamp_now()));

        let id = self
            .store
            .create_record(&Self::path(), fields)
            .await
            .map_err(|e| AppError::write_failed(CREATE_FAILED, e))?;
        tracing::info!("Created match {}", id);

        self.get(&id).await
    }

    pub async fn update(&self, id: &str, request: &SaveMatchRequest) -> Result<Match, AppError> {
        let fields = self.form_fields(request).await?;

        self.store
            .update_record(&Self::path(), id, fields)
            .await
            .map_err(|e| AppError::write_failed(UPDATE_FAILED, e))?;

        self.get(id).await
    }

    /// Delete a match. Its scores and any schedule pointing at it are left alone.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store
            .delete_record(&Self::path(), id)
            .await
            .map_err(|e| AppError::write_failed(DELETE_FAILED, e))?;
        tracing::info!("Deleted match {}", id);
        Ok(())
    }
}
