//! Typed webhook payloads.
//!
//! A webhook body is decoded once at the boundary into [`Update`] and then
//! classified into the tagged [`Inbound`] model the handlers dispatch on.
//! Malformed JSON never gets past the extractor, so the handlers only ever
//! see well-formed shapes.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
    /// Photo variants, ordered by the platform from smallest to largest.
    pub photo: Option<Vec<PhotoSize>>,
    pub video: Option<Attachment>,
    pub document: Option<Attachment>,
    pub audio: Option<Attachment>,
    pub voice: Option<Attachment>,
    pub animation: Option<Attachment>,
    pub sticker: Option<Attachment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ChatKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: i64,
    pub height: i64,
}

/// Any attachment we only need the `file_id` of.
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    pub file_id: String,
}

/// Inbound message classified for dispatch.
#[derive(Debug, Clone)]
pub enum Inbound {
    PrivateText { chat: Chat, text: String },
    GroupText { chat: Chat, text: String },
    MediaUpload { chat: Chat, media: MediaAttachment },
    /// Updates without a usable message: non-message updates, channel posts
    /// delivered as messages, empty payloads. Acknowledged and dropped.
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaAttachment {
    /// Highest-resolution photo variant.
    Photo { file_id: String },
    Video { file_id: String },
    /// Some attachment was present, but not one the relay serves.
    Unsupported,
}

impl Message {
    fn has_attachment(&self) -> bool {
        self.photo.is_some()
            || self.video.is_some()
            || self.document.is_some()
            || self.audio.is_some()
            || self.voice.is_some()
            || self.animation.is_some()
            || self.sticker.is_some()
    }

    /// Media preference: largest photo variant first, then video. Everything
    /// else is unsupported.
    fn media_attachment(&self) -> MediaAttachment {
        if let Some(size) = self.photo.as_ref().and_then(|sizes| sizes.last()) {
            return MediaAttachment::Photo {
                file_id: size.file_id.clone(),
            };
        }
        if let Some(video) = &self.video {
            return MediaAttachment::Video {
                file_id: video.file_id.clone(),
            };
        }
        MediaAttachment::Unsupported
    }
}

impl Inbound {
    pub fn classify(update: Update) -> Self {
        let Some(message) = update.message else {
            return Self::Unrecognized;
        };

        if message.has_attachment() {
            let media = message.media_attachment();
            return Self::MediaUpload {
                chat: message.chat,
                media,
            };
        }

        match (message.text, message.chat.kind) {
            (Some(text), ChatKind::Private) => Self::PrivateText {
                chat: message.chat,
                text,
            },
            (Some(text), ChatKind::Group | ChatKind::Supergroup) => {
                Self::GroupText {
                    chat: message.chat,
                    text,
                }
            }
            _ => Self::Unrecognized,
        }
    }

    pub fn chat(&self) -> Option<&Chat> {
        match self {
            Self::PrivateText { chat, .. }
            | Self::GroupText { chat, .. }
            | Self::MediaUpload { chat, .. } => Some(chat),
            Self::Unrecognized => None,
        }
    }
}
