use crate::conversation::{CompletionMetadata, Message};
use std::future::Future;
use std::pin::Pin;

/// A reply chosen from a provider response, plus the response itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub reply: String,
    /// Full provider payload (choices, usage, ids), kept verbatim.
    pub metadata: CompletionMetadata,
}

impl Completion {
    pub fn into_message(self) -> Message {
        Message::assistant(self.reply, self.metadata)
    }
}

pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = anyhow::Result<Completion>> + Send + 'a>>;

/// Remote chat-completion capability.
///
/// Built once by the orchestrator and passed by reference; implementations
/// perform no retries of their own.
pub trait CompletionClient: Send + Sync {
    /// Provider identifier (e.g. "openai").
    fn name(&self) -> &str;

    fn generate_completion<'a>(
        &'a self,
        model: &'a str,
        messages: &'a [Message],
    ) -> CompletionFuture<'a>;
}
