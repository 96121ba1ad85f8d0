use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - resolved at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Model id sent with every completion request; also namespaces the
    /// conversation cache.
    pub model: String,

    #[serde(default)]
    pub system_prompt: String,

    /// Base folder of the conversation store. A leading `~` is expanded.
    pub conversation_folder: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            model: "gpt-4o-mini".into(),
            system_prompt: "You are Nate, a concise and helpful assistant.".into(),
            conversation_folder: "~/.nate".into(),
            api_key: None,
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn resolved_conversation_folder(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(self.conversation_folder.trim()).into_owned())
    }
}
