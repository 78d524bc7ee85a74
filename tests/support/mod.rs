//! Shared harness: an in-memory record store, a mocked Bot API, and request
//! helpers for driving the router without Postgres or the network.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use mockall::mock;
use tower::ServiceExt;
use url::Url;

use tg_media_relay::{
    infra::config::{
        AccessConfig, Config, DatabaseConfig, ServerConfig, TelegramConfig,
    },
    media::records::{
        MediaRecord, MediaRecordStore, NewMediaRecord, RecordStoreError,
    },
    routes,
    telegram::client::{BotApi, BotApiError},
    AppState,
};

pub const TOKEN: &str = "123456:TEST-TOKEN";
pub const PUBLIC_BASE_URL: &str = "https://relay.example.com";

mock! {
    pub Bot {}

    #[async_trait]
    impl BotApi for Bot {
        async fn send_message(
            &self,
            chat_id: i64,
            text: &str,
        ) -> Result<(), BotApiError>;

        async fn file_url(&self, file_id: &str) -> Result<Url, BotApiError>;
    }
}

/// Insert-only store mirroring the Postgres unique-key behavior.
#[derive(Debug, Default)]
pub struct InMemoryRecords {
    rows: Mutex<Vec<MediaRecord>>,
}

impl InMemoryRecords {
    pub fn all(&self) -> Vec<MediaRecord> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaRecordStore for InMemoryRecords {
    async fn insert(
        &self,
        record: NewMediaRecord,
    ) -> Result<MediaRecord, RecordStoreError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|row| row.access_code == record.access_code) {
            return Err(RecordStoreError::DuplicateAccessCode);
        }
        let row = MediaRecord {
            access_code: record.access_code,
            media_id: record.media_id,
            chat_id: record.chat_id,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_by_access_code(
        &self,
        access_code: &str,
    ) -> Result<Option<MediaRecord>, RecordStoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.access_code == access_code).cloned())
    }
}

pub fn test_config(allowed_group_ids: &[&str]) -> Arc<Config> {
    Arc::new(Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        telegram: TelegramConfig {
            bot_token: TOKEN.into(),
            api_base: "https://api.telegram.org".into(),
        },
        database: DatabaseConfig {
            url: "postgres://unused".into(),
        },
        access: AccessConfig {
            allowed_group_ids: allowed_group_ids
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
        public_base_url: PUBLIC_BASE_URL.into(),
    })
}

pub fn app(
    config: Arc<Config>,
    records: Arc<dyn MediaRecordStore>,
    bot: Arc<dyn BotApi>,
) -> Router {
    routes::create_router(AppState::new(config, records, bot))
}

pub async fn post_webhook(
    router: &Router,
    token: &str,
    payload: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/webhook/{token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("valid request");
    router.clone().oneshot(request).await.expect("router response")
}

pub async fn get_path(router: &Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("valid request");
    router.clone().oneshot(request).await.expect("router response")
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// A photo upload update with two size variants; the large one must win.
pub fn photo_update(chat_id: i64, chat_kind: &str) -> serde_json::Value {
    serde_json::json!({
        "update_id": 1,
        "message": {
            "message_id": 10,
            "chat": {"id": chat_id, "type": chat_kind},
            "photo": [
                {"file_id": "photo_small", "width": 90, "height": 60},
                {"file_id": "photo_large", "width": 1280, "height": 853},
            ],
        },
    })
}

pub fn text_update(
    chat_id: i64,
    chat_kind: &str,
    text: &str,
) -> serde_json::Value {
    serde_json::json!({
        "update_id": 2,
        "message": {
            "message_id": 11,
            "chat": {"id": chat_id, "type": chat_kind},
            "text": text,
        },
    })
}
