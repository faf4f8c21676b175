//! User management panel.

use serde_json::json;

use super::object;
use crate::errors::AppError;
use crate::models::{timestamp_now, CreateUserRequest, UpdateUserRequest, User};
use crate::store::{decode_all, to_fields, Collection, CollectionPath, DocumentStore};

const LIST_FAILED: &str = "載入用戶數據時出錯";
const GET_FAILED: &str = "獲取用戶數據時出錯";
const NOT_FOUND: &str = "找不到該用戶數據";
const EMAIL_REQUIRED: &str = "請輸入電子郵件";
const DUPLICATE_EMAIL: &str = "已存在使用此電子郵件的用戶";
const CREATE_FAILED: &str = "創建用戶時出錯";
const UPDATE_FAILED: &str = "更新用戶時出錯";
const DELETE_FAILED: &str = "刪除用戶時出錯";

/// Users collection operations.
pub struct UsersPanel<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> UsersPanel<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    fn path() -> CollectionPath {
        Collection::Users.into()
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.store
            .fetch_all(Collection::Users)
            .await
            .and_then(decode_all)
            .map_err(|e| AppError::fetch_failed(LIST_FAILED, e))
    }

    /// A user by id, or `None` when there is no record.
    pub async fn find(&self, id: &str) -> Result<Option<User>, AppError> {
        let doc = self
            .store
            .fetch_record(&Self::path(), id)
            .await
            .map_err(|e| AppError::fetch_failed(GET_FAILED, e))?;
        doc.map(|d| d.decode())
            .transpose()
            .map_err(|e| AppError::fetch_failed(GET_FAILED, e))
    }

    pub async fn get(&self, id: &str) -> Result<User, AppError> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    /// Create a user unless the email is taken. The check and the insert are
    /// two separate operations, so concurrent creates can still collide.
    pub async fn create(&self, request: &CreateUserRequest) -> Result<User, AppError> {
        let email = request.email.trim();
        if email.is_empty() {
            return Err(AppError::Validation(EMAIL_REQUIRED.to_string()));
        }

        let existing = self
            .store
            .fetch_where(Collection::Users, "email", email)
            .await
            .map_err(|e| AppError::fetch_failed(CREATE_FAILED, e))?;
        if !existing.is_empty() {
            return Err(AppError::Validation(DUPLICATE_EMAIL.to_string()));
        }

        let mut fields = to_fields(request).map_err(|e| AppError::write_failed(CREATE_FAILED, e))?;
        fields.insert("email".to_string(), json!(email));
        fields.insert("createdAt".to_string(), json!(timestamp_now()));

        let id = self
            .store
            .create_record(&Self::path(), fields)
            .await
            .map_err(|e| AppError::write_failed(CREATE_FAILED, e))?;
        tracing::info!("Created user {}", id);

        self.get(&id).await
    }

    pub async fn update(&self, id: &str, request: &UpdateUserRequest) -> Result<User, AppError> {
        if matches!(request.email.as_deref().map(str::trim), Some("")) {
            return Err(AppError::Validation(EMAIL_REQUIRED.to_string()));
        }

        let mut fields = to_fields(request).map_err(|e| AppError::write_failed(UPDATE_FAILED, e))?;
        fields.extend(object(json!({ "updatedAt": timestamp_now() })));

        self.store
            .update_record(&Self::path(), id, fields)
            .await
            .map_err(|e| AppError::write_failed(UPDATE_FAILED, e))?;

        self.get(id).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store
            .delete_record(&Self::path(), id)
            .await
            .map_err(|e| AppError::write_failed(DELETE_FAILED, e))?;
        tracing::info!("Deleted user {}", id);
        Ok(())
    }
}
