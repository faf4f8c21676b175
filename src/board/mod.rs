//! Match board: joins `matches` onto `schedules` and shapes the grouped view.
//!
//! [`group_matches`] and [`build_view`] are pure. [`MatchBoard`] performs the
//! two fetches as sequential suspension points of one task: matches are only
//! requested once schedules have arrived, since the join filters on schedule
//! ids. There is no in-flight de-duplication; callers serialize invocations.

mod group;
mod view;

pub use group::*;
pub use view::*;

use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{Match, Schedule};
use crate::store::{decode_each, Collection, DocumentStore, StoreError};

/// Notice shown when schedules cannot be fetched.
pub const SCHEDULES_FETCH_FAILED: &str = "獲取賽程數據失敗，請稍後再試";
/// Notice shown when matches cannot be fetched.
pub const MATCHES_FETCH_FAILED: &str = "獲取比賽數據失敗，請稍後再試";

/// Failure of one board load.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("schedules fetch failed: {0}")]
    Schedules(#[source] StoreError),
    /// Schedules arrived but matches did not. `partial` holds the headers
    /// already built; they are not rolled back.
    #[error("matches fetch failed: {source}")]
    Matches {
        #[source]
        source: StoreError,
        partial: BoardView,
    },
}

impl From<BoardError> for AppError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::Schedules(source) => AppError::fetch_failed(SCHEDULES_FETCH_FAILED, source),
            BoardError::Matches { source, partial } => {
                tracing::error!("{}: {}", MATCHES_FETCH_FAILED, source);
                let details = serde_json::to_value(&partial)
                    .ok()
                    .map(|view| serde_json::json!({ "partialView": view }));
                AppError::Fetch {
                    message: MATCHES_FETCH_FAILED.to_string(),
                    details,
                }
            }
        }
    }
}

/// Loads the grouped board from a document store.
#[derive(Clone)]
pub struct MatchBoard {
    store: Arc<dyn DocumentStore>,
}

impl MatchBoard {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch schedules, then matches, and build the view. Every call is a
    /// full re-fetch and returns a freshly built view. Records that do not
    /// decode are skipped and logged; only a failed fetch fails the load.
    pub async fn load(&self) -> Result<BoardView, BoardError> {
        let schedules: Vec<Schedule> = self
            .store
            .fetch_all(Collection::Schedules)
            .await
            .map(decode_each)
            .map_err(BoardError::Schedules)?;

        if schedules.is_empty() {
            tracing::debug!("No schedules, board is empty");
            return Ok(BoardView::empty());
        }

        let matches: Vec<Match> = match self.store.fetch_all(Collection::Matches).await {
            Ok(docs) => decode_each(docs),
            Err(source) => {
                return Err(BoardError::Matches {
                    source,
                    partial: partial_view(&group_matches(schedules, Vec::new())),
                })
            }
        };

        Ok(build_view(&group_matches(schedules, matches)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CollectionPath, Document, Fields, SubCollection};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves canned collections; a `None` collection fails its fetch.
    struct CannedStore {
        schedules: Option<Vec<Document>>,
        matches: Option<Vec<Document>>,
        fetches: AtomicUsize,
    }

    impl CannedStore {
        fn new(schedules: Option<Vec<Document>>, matches: Option<Vec<Document>>) -> Self {
            Self {
                schedules,
                matches,
                fetches: AtomicUsize::new(0),
            }
        }
    }

    fn doc(id: &str, value: serde_json::Value) -> Document {
        Document::new(id, value.as_object().cloned().unwrap_or_default())
    }

    #[async_trait]
    impl DocumentStore for CannedStore {
        async fn fetch_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let canned = match collection {
                Collection::Schedules => &self.schedules,
                Collection::Matches => &self.matches,
                _ => return Ok(Vec::new()),
            };
            canned
                .clone()
                .ok_or_else(|| StoreError::Unavailable(collection.as_str().to_string()))
        }

        async fn fetch_subcollection(
            &self,
            _parent: Collection,
            _parent_id: &str,
            _name: SubCollection,
            _order_by: &str,
        ) -> Result<Vec<Document>, StoreError> {
            Ok(Vec::new())
        }

        async fn fetch_record(
            &self,
            _path: &CollectionPath,
            _id: &str,
        ) -> Result<Option<Document>, StoreError> {
            Ok(None)
        }

        async fn fetch_where(
            &self,
            _collection: Collection,
            _field: &str,
            _value: &str,
        ) -> Result<Vec<Document>, StoreError> {
            Ok(Vec::new())
        }

        async fn create_record(
            &self,
            _path: &CollectionPath,
            _fields: Fields,
        ) -> Result<String, StoreError> {
            Err(StoreError::PermissionDenied("read only".to_string()))
        }

        async fn set_record(
            &self,
            _path: &CollectionPath,
            _id: &str,
            _fields: Fields,
            _merge: bool,
        ) -> Result<(), StoreError> {
            Err(StoreError::PermissionDenied("read only".to_string()))
        }

        async fn update_record(
            &self,
            _path: &CollectionPath,
            _id: &str,
            _fields: Fields,
        ) -> Result<(), StoreError> {
            Err(StoreError::PermissionDenied("read only".to_string()))
        }

        async fn delete_record(
            &self,
            _path: &CollectionPath,
            _id: &str,
        ) -> Result<(), StoreError> {
            Err(StoreError::PermissionDenied("read only".to_string()))
        }
    }

    fn board(store: CannedStore) -> (MatchBoard, Arc<CannedStore>) {
        let store = Arc::new(store);
        (MatchBoard::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_load_groups_matches() {
        let (board, _) = board(CannedStore::new(
            Some(vec![
                doc("s1", json!({ "matchName": "Spring Open", "round": "Final" })),
                doc("s2", json!({ "matchName": "Cup" })),
            ]),
            Some(vec![
                doc("m1", json!({ "tournamentId": "s1", "bluePlayer": "Alice", "redPlayer": "Bob", "status": "ongoing" })),
                doc("m2", json!({ "tournamentId": "elsewhere" })),
            ]),
        ));

        let view = board.load().await.unwrap();
        assert_eq!(view.groups().len(), 2);
        assert!(matches!(view.groups()[0].rows, GroupRows::Matches { matches: ref rows } if rows.len() == 1));
        assert!(matches!(view.groups()[1].rows, GroupRows::Placeholder { .. }));
    }

    #[tokio::test]
    async fn test_empty_schedules_skip_matches_fetch() {
        let (board, store) = board(CannedStore::new(Some(vec![]), None));

        let view = board.load().await.unwrap();
        assert_eq!(view, BoardView::empty());
        assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_schedules_failure_aborts_before_matches() {
        let (board, store) = board(CannedStore::new(None, Some(vec![])));

        let err = board.load().await.unwrap_err();
        assert!(matches!(err, BoardError::Schedules(StoreError::Unavailable(_))));
        assert_eq!(store.fetches.load(Ordering::SeqCst), 1);

        let app: AppError = err.into();
        assert_eq!(app.to_string(), SCHEDULES_FETCH_FAILED);
    }

    #[tokio::test]
    async fn test_matches_failure_keeps_schedule_headers() {
        let (board, _) = board(CannedStore::new(
            Some(vec![doc("s1", json!({ "matchName": "Cup" }))]),
            None,
        ));

        let err = board.load().await.unwrap_err();
        let BoardError::Matches { partial, .. } = &err else {
            panic!("expected matches failure, got {:?}", err);
        };
        assert_eq!(partial.groups().len(), 1);
        assert_eq!(partial.groups()[0].header, "賽程名稱：Cup");
        assert_eq!(partial.groups()[0].rows, GroupRows::Unavailable);

        let app: AppError = err.into();
        let AppError::Fetch { message, details } = app else {
            panic!("expected fetch error");
        };
        assert_eq!(message, MATCHES_FETCH_FAILED);
        assert_eq!(details.unwrap()["partialView"]["groups"][0]["scheduleId"], "s1");
    }

    #[tokio::test]
    async fn test_malformed_matches_are_skipped() {
        let (board, _) = board(CannedStore::new(
            Some(vec![doc("s1", json!({ "matchName": "Cup", "round": "Final" }))]),
            Some(vec![
                doc("m1", json!({ "tournamentId": "s1", "bluePlayer": "Alice", "status": "ongoing" })),
                doc("m2", json!({ "bluePlayer": 7, "status": 1 })),
                doc("m3", json!({ "tournamentId": "s1", "bluePlayer": 7, "redPlayer": false, "status": 1 })),
                doc("m4", json!({ "tournamentId": ["s1"] })),
            ]),
        ));

        let view = board.load().await.unwrap();
        let GroupRows::Matches { matches: rows } = &view.groups()[0].rows else {
            panic!("expected match rows, got {:?}", view.groups()[0].rows);
        };
        let ids: Vec<_> = rows.iter().map(|r| r.match_id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m3"]);
        assert_eq!(rows[1].blue_player, "7");
        assert_eq!(rows[1].red_player, "false");
        assert_eq!(rows[1].badge.label, "已結束");
        assert_eq!(rows[0].badge.label, "進行中");
    }

    #[tokio::test]
    async fn test_reload_is_idempotent() {
        let (board, _) = board(CannedStore::new(
            Some(vec![
                doc("s1", json!({ "matchName": "A", "round": "R1" })),
                doc("s2", json!({ "matchName": "B", "round": "R2" })),
            ]),
            Some(vec![
                doc("m1", json!({ "tournamentId": "s2" })),
                doc("m2", json!({ "tournamentId": "s1" })),
                doc("m3", json!({ "tournamentId": "s2" })),
            ]),
        ));

        let first = board.load().await.unwrap();
        let second = board.load().await.unwrap();
        assert_eq!(first, second);
    }
}
