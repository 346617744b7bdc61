// src/message.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Marker for the automated responder. The backend sends it as an empty object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Bot,
}

/// A single chat line. On the wire the role travels as `is_bot_message`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub time_sent: DateTime<Utc>,
    pub sender: String,
    pub content: String,
    #[serde(rename = "is_bot_message", with = "role_flag")]
    pub role: MessageRole,
}

impl Message {
    /// Builds a user-authored message, trimming the content.
    pub fn from_user(sender: &User, content: &str) -> Result<Self, ValidationError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(Self {
            time_sent: Utc::now(),
            sender: sender.name.clone(),
            content: trimmed.to_string(),
            role: MessageRole::User,
        })
    }

    pub fn is_bot(&self) -> bool {
        self.role == MessageRole::Bot
    }
}

mod role_flag {
    use super::MessageRole;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(role: &MessageRole, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bool(*role == MessageRole::Bot)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<MessageRole, D::Error> {
        Ok(if bool::deserialize(d)? {
            MessageRole::Bot
        } else {
            MessageRole::User
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub user: User,
    #[serde(default)]
    pub bot: Bot,
    #[serde(default)]
    pub messages: Vec<Message>,
}
