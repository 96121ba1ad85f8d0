use super::fingerprint::Fingerprint;
use super::message::Message;
use super::transcript::render_markdown;
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Store-wide pointer to the most recently saved conversation.
pub const INFO_FILE: &str = "info.json";
pub const DATA_FILE: &str = "data.json";
pub const TRANSCRIPT_FILE: &str = "conversation.md";
const CONVERSATIONS_DIR: &str = "conversations";

#[derive(Debug, Serialize, Deserialize)]
struct PointerRecord {
    last_hash: String,
}

/// On-disk conversation records, namespaced by model.
///
/// Layout under the base folder:
///
/// ```text
/// info.json                                   {"last_hash": "<fingerprint>"}
/// <model>/conversations/<fingerprint>/data.json
/// <model>/conversations/<fingerprint>/conversation.md
/// ```
///
/// There is no locking; two processes sharing a base folder race with
/// last-write-wins semantics.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    base_folder: PathBuf,
    model: String,
}

impl ConversationStore {
    pub fn new(base_folder: impl Into<PathBuf>, model: impl Into<String>) -> Self {
        Self {
            base_folder: base_folder.into(),
            model: model.into(),
        }
    }

    pub fn base_folder(&self) -> &Path {
        &self.base_folder
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn ensure_ready(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_folder)
            .map_err(|error| StoreError::io(&self.base_folder, error))
    }

    pub fn conversation_dir(&self, fingerprint: &Fingerprint) -> PathBuf {
        self.base_folder
            .join(&self.model)
            .join(CONVERSATIONS_DIR)
            .join(fingerprint.as_str())
    }

    fn info_path(&self) -> PathBuf {
        self.base_folder.join(INFO_FILE)
    }

    /// Write the full record for `fingerprint`, replacing any previous one,
    /// then point `info.json` at it.
    pub fn save(&self, fingerprint: &Fingerprint, messages: &[Message]) -> Result<(), StoreError> {
        let dir = self.conversation_dir(fingerprint);
        fs::create_dir_all(&dir).map_err(|error| StoreError::io(&dir, error))?;

        let data_path = dir.join(DATA_FILE);
        let data = to_pretty_json(messages)
            .map_err(|error| StoreError::io(&data_path, io::Error::other(error)))?;
        write_atomic(&data_path, &data)?;
        write_atomic(
            &dir.join(TRANSCRIPT_FILE),
            render_markdown(messages).as_bytes(),
        )?;

        self.update_pointer(fingerprint)?;
        info!(
            fingerprint = %fingerprint,
            model = %self.model,
            messages = messages.len(),
            "saved conversation"
        );
        Ok(())
    }

    pub fn load(&self, fingerprint: &Fingerprint) -> Result<Vec<Message>, StoreError> {
        let data_path = self.conversation_dir(fingerprint).join(DATA_FILE);
        debug!(path = %data_path.display(), "loading conversation");

        let raw = match fs::read(&data_path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                let incomplete = self.exists(fingerprint);
                let fingerprint = fingerprint.to_string();
                return Err(if incomplete {
                    StoreError::IncompleteRecord { fingerprint }
                } else {
                    StoreError::NotFound { fingerprint }
                });
            }
            Err(error) => return Err(StoreError::io(data_path, error)),
        };

        serde_json::from_slice(&raw).map_err(|error| StoreError::CorruptData {
            fingerprint: fingerprint.to_string(),
            source: error,
        })
    }

    /// Directory-presence check only; the record's contents are not validated.
    pub fn exists(&self, fingerprint: &Fingerprint) -> bool {
        self.conversation_dir(fingerprint).exists()
    }

    pub fn last_fingerprint(&self) -> Result<Fingerprint, StoreError> {
        let info_path = self.info_path();
        let raw = fs::read(&info_path).map_err(|error| {
            StoreError::ContinuationUnavailable(format!(
                "cannot read {}: {error}",
                info_path.display()
            ))
        })?;

        let pointer: PointerRecord = serde_json::from_slice(&raw).map_err(|error| {
            StoreError::ContinuationUnavailable(format!(
                "malformed {}: {error}",
                info_path.display()
            ))
        })?;

        Fingerprint::parse(&pointer.last_hash)
            .map_err(|error| StoreError::ContinuationUnavailable(error.to_string()))
    }

    fn update_pointer(&self, fingerprint: &Fingerprint) -> Result<(), StoreError> {
        let pointer = PointerRecord {
            last_hash: fingerprint.to_string(),
        };
        let info_path = self.info_path();
        let data = to_pretty_json(&pointer)
            .map_err(|error| StoreError::io(&info_path, io::Error::other(error)))?;
        write_atomic(&info_path, &data)
    }
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|error| StoreError::io(&temp_path, error))?;

    if let Err(rename_error) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::io(path, rename_error));
    }

    Ok(())
}
