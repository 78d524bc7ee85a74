//! Registers an uploaded photo/video and replies with its retrieval link.

use axum::{http::StatusCode, response::Response};
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::infra::app_state::AppState;
use crate::infra::errors::{AppError, AppResult};
use crate::media::records::{MediaRecord, MediaRecordStore, NewMediaRecord, RecordStoreError};
use crate::telegram::types::{Chat, MediaAttachment};

pub const UNSUPPORTED_MEDIA_NOTICE: &str =
    "Unsupported media type. Send a photo or a video.";

/// Bound on access-code re-mints after a unique-key collision. Codes are
/// 8 hex chars of a fresh UUID, so a second collision in a row already
/// points at something badly wrong.
const MAX_MINT_ATTEMPTS: u32 = 3;

pub async fn register_upload(
    state: &AppState,
    chat: &Chat,
    media: MediaAttachment,
) -> AppResult<Response> {
    let (media_id, media_kind) = match media {
        MediaAttachment::Photo { file_id } => (file_id, "photo"),
        MediaAttachment::Video { file_id } => (file_id, "video"),
        MediaAttachment::Unsupported => {
            tracing::info!(chat_id = chat.id, "rejected unsupported media upload");
            state
                .bot
                .send_message(chat.id, UNSUPPORTED_MEDIA_NOTICE)
                .await?;
            return Ok(StatusCode::OK.into_response());
        }
    };

    let record =
        insert_with_fresh_code(state.records.as_ref(), media_id, chat.id)
            .await?;
    tracing::info!(
        access_code = %record.access_code,
        media_kind,
        chat_id = chat.id,
        "registered media upload"
    );

    let link = format!(
        "{}/get/{}",
        state.config.public_base_url, record.access_code
    );
    state
        .bot
        .send_message(chat.id, &format!("Your media link: {link}"))
        .await?;

    Ok(StatusCode::OK.into_response())
}

/// First 8 hex chars of a fresh UUID v4.
pub fn mint_access_code() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    uuid[..8].to_string()
}

async fn insert_with_fresh_code(
    store: &dyn MediaRecordStore,
    media_id: String,
    chat_id: i64,
) -> AppResult<MediaRecord> {
    for attempt in 1..=MAX_MINT_ATTEMPTS {
        let access_code = mint_access_code();
        match store
            .insert(NewMediaRecord {
                access_code,
                media_id: media_id.clone(),
                chat_id,
            })
            .await
        {
            Ok(record) => return Ok(record),
            Err(RecordStoreError::DuplicateAccessCode) => {
                tracing::warn!(attempt, "access code collision, re-minting");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Err(AppError::internal("could not mint a unique access code"))
}
