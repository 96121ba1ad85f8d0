pub mod dispatch;

use crate::config::Invocation;
use crate::conversation::{ConversationSession, ConversationStore, Fingerprint};
use crate::llm::CompletionClient;
use anyhow::{Result, anyhow};
use tracing::debug;

/// What one run produced, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reply: String,
    pub fingerprint: Fingerprint,
    pub cached: bool,
}

/// One invocation: serve the reply from the local cache when the
/// conversation's fingerprint is already on disk, otherwise ask the
/// completion client and persist the extended conversation.
pub struct NateApp<'a> {
    invocation: &'a Invocation,
    session: ConversationSession,
    client: &'a dyn CompletionClient,
}

impl<'a> NateApp<'a> {
    pub fn new(invocation: &'a Invocation, client: &'a dyn CompletionClient) -> Result<Self> {
        let store = ConversationStore::new(&invocation.conversation_folder, &invocation.model);
        let session = ConversationSession::start(invocation, store)?;
        Ok(Self {
            invocation,
            session,
            client,
        })
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub async fn run(mut self) -> Result<Outcome> {
        // A resumed conversation is always on disk already, so the cache
        // would shadow every follow-up.
        let cached = !self.invocation.continue_conversation && self.try_load_cache()?;

        if !cached {
            debug!(
                client = self.client.name(),
                model = %self.invocation.model,
                fingerprint = %self.session.fingerprint(),
                "requesting completion"
            );
            let completion = self
                .client
                .generate_completion(&self.invocation.model, self.session.messages())
                .await?;
            self.session.append_message(completion.into_message());
            self.session.save()?;
        }

        // On a cache hit this is the newest reply stored under the
        // fingerprint, which after a continuation is not the answer to the
        // leading turn itself.
        let reply = self.session.last_reply().ok_or_else(|| {
            anyhow!(
                "conversation {} has no assistant reply",
                self.session.fingerprint()
            )
        })?;

        Ok(Outcome {
            reply: reply.to_string(),
            fingerprint: self.session.fingerprint().clone(),
            cached,
        })
    }

    fn try_load_cache(&mut self) -> Result<bool> {
        let fingerprint = self.session.fingerprint().clone();
        if !self.session.store().exists(&fingerprint) {
            debug!(fingerprint = %fingerprint, "cache miss");
            return Ok(false);
        }

        debug!(fingerprint = %fingerprint, "cache hit");
        self.session.load(&fingerprint)?;
        Ok(true)
    }
}
