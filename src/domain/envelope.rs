//! Chat envelope: the record exchanged over the chat connection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Participant role attached to every envelope.
///
/// The server is free to send roles this client does not know yet, so
/// anything other than `user`/`admin` lands in [`SenderRole::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SenderRole {
    #[default]
    User,
    Admin,
    Other(String),
}

impl SenderRole {
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Other(role) => role,
        }
    }
}

impl From<String> for SenderRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => Self::User,
            "admin" => Self::Admin,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for SenderRole {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<SenderRole> for String {
    fn from(role: SenderRole) -> Self {
        match role {
            SenderRole::Other(role) => role,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for SenderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire message, identical in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEnvelope {
    pub chat_id: String,
    pub sender: SenderRole,
    pub content: String,
}

impl ChatEnvelope {
    pub fn new(
        chat_id: impl Into<String>,
        sender: SenderRole,
        content: impl Into<String>,
    ) -> Self {
        Self {
            chat_id: chat_id.into(),
            sender,
            content: content.into(),
        }
    }

    /// Returns true when the content carries something besides whitespace.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}
