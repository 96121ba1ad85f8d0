use super::message::{Message, Role};
use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fmt;

/// Number of leading messages that define a conversation's identity.
const IDENTITY_PREFIX_LEN: usize = 2;

/// Hex length of a SHA-1 digest.
pub const FINGERPRINT_LEN: usize = 40;

/// Deterministic identity of a conversation, derived from its leading turn(s).
///
/// Only the first two messages count, and an assistant message ends the
/// prefix early. The role/content pairs are concatenated, lower-cased and
/// hashed with SHA-1, so two conversations opening with the same system and
/// user text (ignoring case) share a fingerprint. That collision is the cache
/// key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(messages: &[Message]) -> Result<Self, SessionError> {
        if messages.is_empty() {
            return Err(SessionError::EmptyConversation);
        }

        let mut hash_input = String::new();
        for message in messages
            .iter()
            .take(IDENTITY_PREFIX_LEN)
            .take_while(|message| message.role != Role::Assistant)
        {
            hash_input.push_str(&message.role.to_string());
            hash_input.push_str(&message.content);
        }

        let digest = Sha1::digest(hash_input.to_lowercase().as_bytes());
        Ok(Self(hex::encode(digest)))
    }

    /// Accepts an externally supplied fingerprint (pointer record, CLI).
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        let trimmed = raw.trim();
        let well_formed = trimmed.len() == FINGERPRINT_LEN
            && trimmed
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(SessionError::InvalidFingerprint(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
