//! Webhook intake: token check, permission filter, dispatch.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::infra::app_state::AppState;
use crate::infra::errors::{AppError, AppResult};
use crate::media::registrar;
use crate::telegram::types::{Inbound, Update};
use crate::webhook::permissions;

pub const REJECTION_NOTICE: &str =
    "Sorry, this bot is restricted to approved group chats.";

/// `POST /webhook/{token}`
///
/// The path token must match the configured bot token; Telegram knows the
/// token, nobody else should. Everything that parses but does not match a
/// handled shape is acknowledged with a bare 200 so the platform does not
/// re-deliver it.
pub async fn handle_update(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(update): Json<Update>,
) -> AppResult<Response> {
    if token != state.config.telegram.bot_token {
        return Err(AppError::not_found("Not found"));
    }

    let inbound = Inbound::classify(update);
    let Some(chat) = inbound.chat().cloned() else {
        return Ok(StatusCode::OK.into_response());
    };

    if !permissions::chat_is_allowed(&chat, &state.config.access.allowed_group_ids)
    {
        tracing::info!(
            chat_id = chat.id,
            chat_kind = ?chat.kind,
            "denied update from unlisted chat"
        );
        state.bot.send_message(chat.id, REJECTION_NOTICE).await?;
        return Ok(StatusCode::OK.into_response());
    }

    match inbound {
        Inbound::MediaUpload { media, .. } => {
            registrar::register_upload(&state, &chat, media).await
        }
        Inbound::PrivateText { text, .. } | Inbound::GroupText { text, .. } => {
            // `/get` is recognized but unhandled; everything text-shaped is
            // acknowledged without side effects.
            if text.starts_with("/get ") {
                tracing::debug!(chat_id = chat.id, "ignoring /get text command");
            }
            Ok(StatusCode::OK.into_response())
        }
        Inbound::Unrecognized => Ok(StatusCode::OK.into_response()),
    }
}
