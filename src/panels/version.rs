//! Published app version, read by the mobile clients.

use serde_json::json;

use super::object;
use crate::errors::AppError;
use crate::models::{timestamp_now, AppVersion};
use crate::store::{Collection, DocumentStore};

/// Record id of the version entry in the settings collection.
pub const VERSION_RECORD: &str = "app";

const FETCH_FAILED: &str = "獲取版本失敗";
const UPDATE_FAILED: &str = "更新版本失敗";
const VERSION_REQUIRED: &str = "請輸入版本號";

pub async fn current_version(store: &dyn DocumentStore) -> Result<AppVersion, AppError> {
    let doc = store
        .fetch_record(&Collection::Settings.into(), VERSION_RECORD)
        .await
        .map_err(|e| AppError::fetch_failed(FETCH_FAILED, e))?;
    match doc {
        Some(doc) => doc.decode().map_err(|e| AppError::fetch_failed(FETCH_FAILED, e)),
        None => Ok(AppVersion {
            version: None,
            updated_at: None,
        }),
    }
}

/// Overwrite the published version.
pub async fn publish_version(store: &dyn DocumentStore, version: &str) -> Result<AppVersion, AppError> {
    let version = version.trim();
    if version.is_empty() {
        return Err(AppError::Validation(VERSION_REQUIRED.to_string()));
    }

    let fields = object(json!({
        "version": version,
        "updatedAt": timestamp_now(),
    }));
    store
        .set_record(&Collection::Settings.into(), VERSION_RECORD, fields, true)
        .await
        .map_err(|e| AppError::write_failed(UPDATE_FAILED, e))?;
    tracing::info!("App version set to {}", version);

    current_version(store).await
}
