use std::path::PathBuf;
use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `nate`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide what to report; orchestration code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum NateError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Conversation store ──────────────────────────────────────────────
    #[error("store: {0}")]
    Store(#[from] StoreError),

    // ── Conversation session ────────────────────────────────────────────
    #[error("session: {0}")]
    Session(#[from] SessionError),

    // ── LLM / completion client ─────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("message was not provided")]
    MissingMessage,
}

// ─── Store errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no conversation found with fingerprint {fingerprint}")]
    NotFound { fingerprint: String },

    #[error("conversation {fingerprint} has unreadable data: {source}")]
    CorruptData {
        fingerprint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The record directory exists but its data file was never written,
    /// e.g. a save interrupted before the rename.
    #[error("conversation {fingerprint} has unreadable data: data.json is missing")]
    IncompleteRecord { fingerprint: String },

    #[error("could not continue last conversation: {0}")]
    ContinuationUnavailable(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// ─── Session errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no user prompt or system prompt was provided")]
    EmptyConversation,

    #[error("invalid fingerprint: {0}")]
    InvalidFingerprint(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

// ─── LLM errors ──────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} API key not set. Set OPENAI_API_KEY or edit config.toml.")]
    MissingApiKey { provider: String },

    #[error("{provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("no response from {provider}")]
    EmptyResponse { provider: String },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, NateError>;
