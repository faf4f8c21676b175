//! Document store capability.
//!
//! The rest of the backend only sees [`DocumentStore`]: collections of
//! schemaless JSON records addressed by an opaque id, delivered in the order
//! the store holds them. [`SqliteStore`] is the production implementation.

mod sqlite;

pub use sqlite::*;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Field map of a single record.
pub type Fields = Map<String, Value>;

/// Errors raised by a document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("malformed record: {0}")]
    Malformed(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Malformed(err.to_string())
    }
}

/// Top-level collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Matches,
    Schedules,
    Settings,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Matches => "matches",
            Collection::Schedules => "schedules",
            Collection::Settings => "settings",
        }
    }
}

/// Collections nested under a parent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubCollection {
    Scores,
}

impl SubCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubCollection::Scores => "scores",
        }
    }
}

/// Location of a collection, either top-level or nested under one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionPath {
    Root(Collection),
    Nested {
        parent: Collection,
        parent_id: String,
        name: SubCollection,
    },
}

impl CollectionPath {
    pub fn nested(parent: Collection, parent_id: &str, name: SubCollection) -> Self {
        CollectionPath::Nested {
            parent,
            parent_id: parent_id.to_string(),
            name,
        }
    }

    /// Slash-separated key, e.g. `matches/m1/scores`.
    pub fn key(&self) -> String {
        match self {
            CollectionPath::Root(collection) => collection.as_str().to_string(),
            CollectionPath::Nested {
                parent,
                parent_id,
                name,
            } => format!("{}/{}/{}", parent.as_str(), parent_id, name.as_str()),
        }
    }
}

impl From<Collection> for CollectionPath {
    fn from(collection: Collection) -> Self {
        CollectionPath::Root(collection)
    }
}

/// A record as delivered by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Decode into a typed record. The document id is exposed as field `id`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, StoreError> {
        let mut fields = self.fields;
        fields.insert("id".to_string(), Value::String(self.id));
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

/// Decode a whole fetch result, keeping delivery order.
pub fn decode_all<T: DeserializeOwned>(docs: Vec<Document>) -> Result<Vec<T>, StoreError> {
    docs.into_iter().map(Document::decode).collect()
}

/// Decode each record on its own, skipping and logging the ones that do not
/// fit `T`.
pub fn decode_each<T: DeserializeOwned>(docs: Vec<Document>) -> Vec<T> {
    docs.into_iter()
        .filter_map(|doc| {
            let id = doc.id.clone();
            match doc.decode() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("Skipping record {}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

/// Serialize a typed value into a field map, dropping `id` and absent fields.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(mut map) => {
            map.remove("id");
            map.retain(|_, v| !v.is_null());
            Ok(map)
        }
        other => Err(StoreError::Malformed(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

/// Capability interface over the hosted document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All records of a top-level collection in delivery order.
    async fn fetch_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError>;

    /// All records of a nested collection, ascending by `order_by`.
    async fn fetch_subcollection(
        &self,
        parent: Collection,
        parent_id: &str,
        name: SubCollection,
        order_by: &str,
    ) -> Result<Vec<Document>, StoreError>;

    /// A single record, if present.
    async fn fetch_record(
        &self,
        path: &CollectionPath,
        id: &str,
    ) -> Result<Option<Document>, StoreError>;

    /// Records whose string field equals `value`.
    async fn fetch_where(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError>;

    /// Insert a record under a fresh id and return the id.
    async fn create_record(&self, path: &CollectionPath, fields: Fields)
        -> Result<String, StoreError>;

    /// Write a record under a known id. With `merge`, existing fields not in
    /// `fields` are kept.
    async fn set_record(
        &self,
        path: &CollectionPath,
        id: &str,
        fields: Fields,
        merge: bool,
    ) -> Result<(), StoreError>;

    /// Shallow-merge `fields` into an existing record.
    async fn update_record(
        &self,
        path: &CollectionPath,
        id: &str,
        fields: Fields,
    ) -> Result<(), StoreError>;

    /// Remove a record. Nested collections are left in place.
    async fn delete_record(&self, path: &CollectionPath, id: &str) -> Result<(), StoreError>;
}
