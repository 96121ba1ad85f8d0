use crate::config::{Config, Invocation};
use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// `nate` - chat with a language model from the terminal.
///
/// Replies are cached on disk per model; asking the same opening question
/// again is answered locally.
#[derive(Parser, Debug)]
#[command(name = "nate")]
#[command(version)]
#[command(about = "Chat with an LLM from the command line.", long_about = None)]
pub struct Cli {
    /// Message to send (words are joined with single spaces)
    #[arg(required = true, value_name = "MESSAGE")]
    pub message: Vec<String>,

    /// Continue the most recently saved conversation
    #[arg(short = 'c', long = "continue")]
    pub continue_conversation: bool,

    /// Do not send the configured system prompt
    #[arg(long = "no-sys")]
    pub no_system_prompt: bool,

    /// Config file (default: $NATE_CONFIG or ~/.nate/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Model to use for this run instead of the configured one
    #[arg(short, long)]
    pub model: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn message_text(&self) -> String {
        self.message.join(" ")
    }

    pub fn invocation(&self, config: &Config) -> Result<Invocation, ConfigError> {
        Invocation::new(
            config,
            self.message_text(),
            self.continue_conversation,
            !self.no_system_prompt,
        )
    }
}
