//! Outbound Bot API client.
//!
//! The handlers depend on the [`BotApi`] trait rather than the concrete
//! reqwest client so the webhook and retrieval flows can be exercised in
//! tests without the network.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum BotApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("telegram api returned status {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("malformed telegram response: {0}")]
    Malformed(String),

    #[error("telegram api response missing file_path for file {file_id}")]
    MissingFilePath { file_id: String },
}

/// The two Bot API operations the relay consumes.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// POST `sendMessage` with `{chat_id, text}`.
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
    ) -> Result<(), BotApiError>;

    /// Resolve a `file_id` through `getFile` into the CDN download URL.
    async fn file_url(&self, file_id: &str) -> Result<Url, BotApiError>;
}

pub struct TelegramClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl TelegramClient {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            token: token.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    fn download_url(&self, file_path: &str) -> Result<Url, BotApiError> {
        let raw = format!("{}/file/bot{}/{}", self.api_base, self.token, file_path);
        Url::parse(&raw).map_err(|err| {
            BotApiError::Malformed(format!("invalid file url `{raw}`: {err}"))
        })
    }

    async fn read_result<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, BotApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BotApiError::Api { status, message });
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|err| BotApiError::Malformed(err.to_string()))?;
        if !envelope.ok {
            return Err(BotApiError::Api {
                status,
                message: envelope
                    .description
                    .unwrap_or_else(|| "ok=false without description".into()),
            });
        }
        envelope.result.ok_or_else(|| {
            BotApiError::Malformed("ok=true but result is missing".into())
        })
    }
}

#[async_trait]
impl BotApi for TelegramClient {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
    ) -> Result<(), BotApiError> {
        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await?;
        self.read_result::<serde_json::Value>(response).await?;
        Ok(())
    }

    async fn file_url(&self, file_id: &str) -> Result<Url, BotApiError> {
        let response = self
            .http
            .get(self.method_url("getFile"))
            .query(&[("file_id", file_id)])
            .send()
            .await?;
        let info: FileInfo = self.read_result(response).await?;

        let file_path =
            info.file_path.ok_or_else(|| BotApiError::MissingFilePath {
                file_id: file_id.to_string(),
            })?;
        self.download_url(&file_path)
    }
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The token is a credential; keep it out of logs.
        f.debug_struct("TelegramClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ApiEnvelope<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct FileInfo {
    file_path: Option<String>,
}
