//! Allow-list check for inbound chats.

use crate::telegram::types::{Chat, ChatKind};

/// Private chats are always allowed; groups and supergroups only when their
/// id (decimal string form) is on the configured allow-list; everything else
/// (channels, unknown kinds) is denied.
pub fn chat_is_allowed(chat: &Chat, allowed_group_ids: &[String]) -> bool {
    match chat.kind {
        ChatKind::Private => true,
        ChatKind::Group | ChatKind::Supergroup => {
            let id = chat.id.to_string();
            allowed_group_ids.iter().any(|allowed| *allowed == id)
        }
        ChatKind::Channel | ChatKind::Unknown => false,
    }
}
