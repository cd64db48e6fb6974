use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored key/message pair. When a chat message equals `key`, the bot
/// answers with `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAlias {
    pub key: String,
    pub message: String,
    pub creator_id: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub usage_count: u32,
}

impl MessageAlias {
    pub fn new(key: impl Into<String>, message: impl Into<String>, creator_id: u64) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
            creator_id,
            created_at: Utc::now(),
            usage_count: 0,
        }
    }
}

/// One chat message as delivered by a gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub text: String,
    pub author_id: u64,
    pub is_bot: bool,
}

impl IncomingMessage {
    pub fn from_user(text: impl Into<String>, author_id: u64) -> Self {
        Self {
            text: text.into(),
            author_id,
            is_bot: false,
        }
    }

    pub fn from_bot(text: impl Into<String>, author_id: u64) -> Self {
        Self {
            text: text.into(),
            author_id,
            is_bot: true,
        }
    }
}
