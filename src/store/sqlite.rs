//! SQLite-backed document store.
//!
//! Each record is one row holding its collection key, its id and the field
//! map as JSON text. `seq` preserves insertion order, which is the delivery
//! order for unordered fetches.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use super::{Collection, CollectionPath, Document, DocumentStore, Fields, StoreError, SubCollection};

/// Document store persisted in a single SQLite table.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database file and prepare the schema.
    pub async fn open(db_path: &Path) -> Result<Self, StoreError> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let options = SqliteConnectOptions::from_str(&db_url)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        run_migrations(&pool).await?;

        Ok(Self::new(pool))
    }

    async fn insert(&self, path: &str, id: &str, fields: &Fields) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO documents (path, id, fields) VALUES (?, ?, ?)")
            .bind(path)
            .bind(id)
            .bind(serde_json::to_string(fields)?)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn replace(&self, path: &str, id: &str, fields: &Fields) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE documents SET fields = ? WHERE path = ? AND id = ?")
            .bind(serde_json::to_string(fields)?)
            .bind(path)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Create the documents table if it does not exist.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            path TEXT NOT NULL,
            id TEXT NOT NULL,
            fields TEXT NOT NULL,
            UNIQUE (path, id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_documents_path ON documents(path, seq);")
        .execute(pool)
        .await?;

    Ok(())
}

/// JSON path for a top-level field name, quoted so any key is addressable.
fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', "\\\""))
}

fn document_from_row(row: &SqliteRow) -> Result<Document, StoreError> {
    let id: String = row.get("id");
    let raw: String = row.get("fields");
    let fields: Fields = serde_json::from_str(&raw)
        .map_err(|e| StoreError::Malformed(format!("{}: {}", id, e)))?;
    Ok(Document { id, fields })
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn fetch_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query("SELECT id, fields FROM documents WHERE path = ? ORDER BY seq")
            .bind(collection.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(document_from_row).collect()
    }

    async fn fetch_subcollection(
        &self,
        parent: Collection,
        parent_id: &str,
        name: SubCollection,
        order_by: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let path = CollectionPath::nested(parent, parent_id, name);
        let rows = sqlx::query(
            "SELECT id, fields FROM documents WHERE path = ? ORDER BY json_extract(fields, ?), seq",
        )
        .bind(path.key())
        .bind(json_path(order_by))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(document_from_row).collect()
    }

    async fn fetch_record(
        &self,
        path: &CollectionPath,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query("SELECT id, fields FROM documents WHERE path = ? AND id = ?")
            .bind(path.key())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(document_from_row).transpose()
    }

    async fn fetch_where(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, fields FROM documents WHERE path = ? AND json_extract(fields, ?) = ? ORDER BY seq",
        )
        .bind(collection.as_str())
        .bind(json_path(field))
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(document_from_row).collect()
    }

    async fn create_record(
        &self,
        path: &CollectionPath,
        fields: Fields,
    ) -> Result<String, StoreError> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.insert(&path.key(), &id, &fields).await?;
        tracing::debug!("Created {}/{}", path.key(), id);
        Ok(id)
    }

    async fn set_record(
        &self,
        path: &CollectionPath,
        id: &str,
        fields: Fields,
        merge: bool,
    ) -> Result<(), StoreError> {
        let key = path.key();
        match self.fetch_record(path, id).await? {
            Some(existing) => {
                let fields = if merge {
                    let mut merged = existing.fields;
                    merged.extend(fields);
                    merged
                } else {
                    fields
                };
                self.replace(&key, id, &fields).await?;
            }
            None => self.insert(&key, id, &fields).await?,
        }
        Ok(())
    }

    async fn update_record(
        &self,
        path: &CollectionPath,
        id: &str,
        fields: Fields,
    ) -> Result<(), StoreError> {
        let key = path.key();
        let existing = self
            .fetch_record(path, id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", key, id)))?;

        let mut merged = existing.fields;
        merged.extend(fields);

        if self.replace(&key, id, &merged).await? == 0 {
            // Deleted between read and write
            return Err(StoreError::NotFound(format!("{}/{}", key, id)));
        }
        Ok(())
    }

    async fn delete_record(&self, path: &CollectionPath, id: &str) -> Result<(), StoreError> {
        let key = path.key();
        let result = sqlx::query("DELETE FROM documents WHERE path = ? AND id = ?")
            .bind(&key)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("{}/{}", key, id)));
        }
        Ok(())
    }
}
