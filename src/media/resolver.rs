//! Resolves an access code into a redirect to the media file.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::infra::app_state::AppState;
use crate::infra::errors::{AppError, AppResult};

pub const NOT_FOUND_MESSAGE: &str = "link not found or expired";

/// `GET /get/{access_code}`
///
/// Looks up the record, resolves the stored `file_id` through `getFile`, and
/// answers with a 302 to the CDN URL. Unknown codes are a plain-text 404; a
/// failed or empty `getFile` response is a 502.
pub async fn handle_retrieval(
    State(state): State<AppState>,
    Path(access_code): Path<String>,
) -> AppResult<Response> {
    let record = state
        .records
        .find_by_access_code(&access_code)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))?;

    let file_url = state.bot.file_url(&record.media_id).await?;
    tracing::debug!(
        access_code = %record.access_code,
        chat_id = record.chat_id,
        "redirecting to media file"
    );

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, file_url.to_string())],
    )
        .into_response())
}
