#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod ui;

pub use app::{NateApp, Outcome};
pub use config::{Config, Invocation};
pub use conversation::{ConversationSession, ConversationStore, Fingerprint, Message, Role};
pub use error::{ConfigError, LlmError, NateError, SessionError, StoreError};
pub use llm::{CannedClient, Completion, CompletionClient, OpenAiClient};
