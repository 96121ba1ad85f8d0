use super::Config;
use crate::error::ConfigError;
use std::path::PathBuf;

/// Everything one run of the client needs, resolved once from the config
/// file and the command line and then passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub model: String,
    pub system_prompt: String,
    pub use_system_prompt: bool,
    pub continue_conversation: bool,
    /// The new user turn.
    pub message: String,
    /// Absolute base folder of the conversation store, `~` already expanded.
    pub conversation_folder: PathBuf,
}

impl Invocation {
    pub fn new(
        config: &Config,
        message: String,
        continue_conversation: bool,
        use_system_prompt: bool,
    ) -> Result<Self, ConfigError> {
        if message.trim().is_empty() {
            return Err(ConfigError::MissingMessage);
        }

        Ok(Self {
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            use_system_prompt,
            continue_conversation,
            message,
            conversation_folder: config.resolved_conversation_folder(),
        })
    }
}
