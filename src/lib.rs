//! # Telegram media relay
//!
//! A small webhook-driven relay around the Telegram Bot API:
//!
//! - **Webhook intake**: `POST /webhook/{token}` receives bot updates,
//!   enforces a group allow-list, and registers uploaded photos/videos.
//! - **Registration**: each accepted upload is stored as an immutable
//!   `media_records` row mapping a short access code to the Telegram
//!   `file_id`, and the uploader gets a retrieval link back.
//! - **Retrieval**: `GET /get/{access_code}` resolves the stored `file_id`
//!   through the Bot API `getFile` endpoint and 302-redirects to the file
//!   on Telegram's CDN.
//!
//! The server is built on Axum and uses PostgreSQL (sqlx) for the access
//! code mapping and reqwest for outbound Bot API calls.

pub mod infra;
pub mod media;
pub mod routes;
pub mod telegram;
pub mod webhook;

pub use infra::app_state::AppState;

/// Embedded schema migrations, applied once at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
