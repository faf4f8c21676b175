//! Score editing panel for a single match.

use serde_json::json;

use super::object;
use crate::errors::AppError;
use crate::identity::IdentityGateway;
use crate::models::{
    timestamp_now, AddScoreRequest, Score, UpdateScoreRequest, MAX_POINTS, MIN_POINTS,
};
use crate::store::{decode_all, Collection, CollectionPath, DocumentStore, SubCollection};

const MATCH_NOT_FOUND: &str = "找不到該比賽數據";
const MATCH_LOOKUP_FAILED: &str = "獲取比賽數據失敗，請稍後再試";
const LIST_FAILED: &str = "獲取得分記錄失敗，請稍後再試";
const POINTS_OUT_OF_RANGE: &str = "得分點數必須介於1到5之間";
const ADD_FAILED: &str = "添加得分記錄失敗，請稍後再試";
const UPDATE_FAILED: &str = "更新得分記錄失敗，請稍後再試";
const DELETE_FAILED: &str = "刪除得分記錄失敗，請稍後再試";

/// Field the score list is ordered by.
const ORDER_FIELD: &str = "timestamp";

fn check_points(points: i64) -> Result<i64, AppError> {
    if (MIN_POINTS..=MAX_POINTS).contains(&points) {
        Ok(points)
    } else {
        Err(AppError::Validation(POINTS_OUT_OF_RANGE.to_string()))
    }
}

/// Scores of one match. Writes are stamped with the caller's id.
pub struct ScoresPanel<'a> {
    store: &'a dyn DocumentStore,
    identity: &'a dyn IdentityGateway,
    match_id: String,
}

impl<'a> ScoresPanel<'a> {
    pub fn new(
        store: &'a dyn DocumentStore,
        identity: &'a dyn IdentityGateway,
        match_id: &str,
    ) -> Self {
        Self {
            store,
            identity,
            match_id: match_id.to_string(),
        }
    }

    fn path(&self) -> CollectionPath {
        CollectionPath::nested(Collection::Matches, &self.match_id, SubCollection::Scores)
    }

    async fn ensure_match(&self) -> Result<(), AppError> {
        let found = self
            .store
            .fetch_record(&Collection::Matches.into(), &self.match_id)
            .await
            .map_err(|e| AppError::fetch_failed(MATCH_LOOKUP_FAILED, e))?;
        match found {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(MATCH_NOT_FOUND.to_string())),
        }
    }

    async fn get(&self, score_id: &str) -> Result<Score, AppError> {
        let doc = self
            .store
            .fetch_record(&self.path(), score_id)
            .await
            .map_err(|e| AppError::fetch_failed(LIST_FAILED, e))?
            .ok_or_else(|| AppError::NotFound(format!("Score {} not found", score_id)))?;
        doc.decode().map_err(|e| AppError::fetch_failed(LIST_FAILED, e))
    }

    /// All scores of the match, oldest first.
    pub async fn list(&self) -> Result<Vec<Score>, AppError> {
        self.ensure_match().await?;
        self.store
            .fetch_subcollection(
                Collection::Matches,
                &self.match_id,
                SubCollection::Scores,
                ORDER_FIELD,
            )
            .await
            .and_then(decode_all)
            .map_err(|e| AppError::fetch_failed(LIST_FAILED, e))
    }

    pub async fn add(&self, request: &AddScoreRequest) -> Result<Score, AppError> {
        let points = check_points(request.points.unwrap_or(MIN_POINTS))?;
        self.ensure_match().await?;

        let now = timestamp_now();
        let fields = object(json!({
            "player": request.player,
            "points": points,
            "timestamp": now,
            "createdAt": now,
            "createdBy": self.identity.actor_id(),
        }));

        let id = self
            .store
            .create_record(&self.path(), fields)
            .await
            .map_err(|e| AppError::write_failed(ADD_FAILED, e))?;
        tracing::info!("Added score {} to match {}", id, self.match_id);

        self.get(&id).await
    }

    pub async fn update(&self, score_id: &str, request: &UpdateScoreRequest) -> Result<Score, AppError> {
        let mut fields = object(json!({
            "updatedAt": timestamp_now(),
            "updatedBy": self.identity.actor_id(),
        }));
        if let Some(player) = request.player {
            fields.insert("player".to_string(), json!(player));
        }
        if let Some(points) = request.points {
            fields.insert("points".to_string(), json!(check_points(points)?));
        }

        self.store
            .update_record(&self.path(), score_id, fields)
            .await
            .map_err(|e| AppError::write_failed(UPDATE_FAILED, e))?;

        self.get(score_id).await
    }

    pub async fn delete(&self, score_id: &str) -> Result<(), AppError> {
        self.store
            .delete_record(&self.path(), score_id)
            .await
            .map_err(|e| AppError::write_failed(DELETE_FAILED, e))?;
        tracing::info!("Deleted score {} from match {}", score_id, self.match_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{CurrentUser, RequestIdentity, UNKNOWN_ACTOR};
    use crate::models::Side;
    use crate::store::SqliteStore;
    use tempfile::TempDir;

    async fn store_with_match() -> (SqliteStore, String, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteStore::open(&temp_dir.path().join("scores.sqlite"))
            .await
            .unwrap();
        let match_id = store
            .create_record(&Collection::Matches.into(), object(json!({ "name": "Final" })))
            .await
            .unwrap();
        (store, match_id, temp_dir)
    }

    fn referee() -> RequestIdentity {
        RequestIdentity::new(Some(CurrentUser {
            id: "ref-1".to_string(),
            email: None,
            display_name: None,
        }))
    }

    #[tokio::test]
    async fn test_add_stamps_actor_and_lists_in_time_order() {
        let (store, match_id, _dir) = store_with_match().await;
        let identity = referee();
        let panel = ScoresPanel::new(&store, &identity, &match_id);

        let first = panel
            .add(&AddScoreRequest {
                player: Side::Red,
                points: Some(3),
            })
            .await
            .unwrap();
        let second = panel
            .add(&AddScoreRequest {
                player: Side::Blue,
                points: None,
            })
            .await
            .unwrap();
        assert_eq!(first.created_by.as_deref(), Some("ref-1"));
        assert_eq!(second.points, 1);

        let scores = panel.list().await.unwrap();
        let ids: Vec<_> = scores.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
    }

    #[tokio::test]
    async fn test_points_out_of_range_rejected() {
        let (store, match_id, _dir) = store_with_match().await;
        let identity = referee();
        let panel = ScoresPanel::new(&store, &identity, &match_id);

        for points in [0, 6, -1] {
            let err = panel
                .add(&AddScoreRequest {
                    player: Side::Blue,
                    points: Some(points),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert!(panel.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_by_anonymous_caller() {
        let (store, match_id, _dir) = store_with_match().await;
        let identity = referee();
        let score = ScoresPanel::new(&store, &identity, &match_id)
            .add(&AddScoreRequest {
                player: Side::Blue,
                points: Some(2),
            })
            .await
            .unwrap();

        let anonymous = RequestIdentity::anonymous();
        let panel = ScoresPanel::new(&store, &anonymous, &match_id);
        let updated = panel
            .update(
                &score.id,
                &UpdateScoreRequest {
                    player: Some(Side::Red),
                    points: Some(5),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.player, Side::Red);
        assert_eq!(updated.points, 5);
        assert_eq!(updated.updated_by.as_deref(), Some(UNKNOWN_ACTOR));
        assert_eq!(updated.created_by.as_deref(), Some("ref-1"));

        panel.delete(&score.id).await.unwrap();
        assert!(matches!(panel.delete(&score.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_scores_of_missing_match() {
        let (store, _match_id, _dir) = store_with_match().await;
        let identity = referee();
        let panel = ScoresPanel::new(&store, &identity, "ghost");

        assert!(matches!(panel.list().await, Err(AppError::NotFound(_))));
    }
}
