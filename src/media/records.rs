//! The one persisted entity: the access code to `file_id` mapping.
//!
//! Records are created exactly once by the registrar, read by the resolver,
//! and never mutated or deleted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MediaRecord {
    pub access_code: String,
    pub media_id: String,
    pub chat_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMediaRecord {
    pub access_code: String,
    pub media_id: String,
    pub chat_id: i64,
}

#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// The minted access code collided with an existing row. The registrar
    /// re-mints and retries on this.
    #[error("access code already exists")]
    DuplicateAccessCode,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait MediaRecordStore: Send + Sync {
    async fn insert(
        &self,
        record: NewMediaRecord,
    ) -> Result<MediaRecord, RecordStoreError>;

    async fn find_by_access_code(
        &self,
        access_code: &str,
    ) -> Result<Option<MediaRecord>, RecordStoreError>;
}

#[derive(Debug, Clone)]
pub struct PostgresMediaRecords {
    pool: PgPool,
}

impl PostgresMediaRecords {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRecordStore for PostgresMediaRecords {
    async fn insert(
        &self,
        record: NewMediaRecord,
    ) -> Result<MediaRecord, RecordStoreError> {
        sqlx::query_as::<_, MediaRecord>(
            r#"
            INSERT INTO media_records (access_code, media_id, chat_id)
            VALUES ($1, $2, $3)
            RETURNING access_code, media_id, chat_id, created_at
            "#,
        )
        .bind(&record.access_code)
        .bind(&record.media_id)
        .bind(record.chat_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RecordStoreError::DuplicateAccessCode
            }
            _ => RecordStoreError::Database(err),
        })
    }

    async fn find_by_access_code(
        &self,
        access_code: &str,
    ) -> Result<Option<MediaRecord>, RecordStoreError> {
        let record = sqlx::query_as::<_, MediaRecord>(
            r#"
            SELECT access_code, media_id, chat_id, created_at
            FROM media_records
            WHERE access_code = $1
            "#,
        )
        .bind(access_code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }
}
