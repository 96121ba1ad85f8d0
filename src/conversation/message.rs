use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider response carried verbatim on assistant messages.
///
/// Key order is preserved so a saved record reproduces the provider payload
/// as it was received.
pub type CompletionMetadata = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Heading used in the markdown transcript (`System`, `User`, `Assistant`).
    pub fn title(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<CompletionMetadata>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            completion: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            completion: None,
        }
    }

    pub fn assistant(content: impl Into<String>, completion: CompletionMetadata) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            completion: Some(completion),
        }
    }
}
