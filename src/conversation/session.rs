use super::fingerprint::Fingerprint;
use super::message::{Message, Role};
use super::store::ConversationStore;
use crate::config::Invocation;
use crate::error::SessionError;
use tracing::{debug, warn};

/// The turn sequence of one invocation and its identity.
///
/// Built in a single pass: optionally resume the last saved conversation,
/// seed the system prompt (fresh conversations only) and the new user turn,
/// then fingerprint the leading turns.
#[derive(Debug)]
pub struct ConversationSession {
    store: ConversationStore,
    messages: Vec<Message>,
    fingerprint: Fingerprint,
    resumed: bool,
}

impl ConversationSession {
    pub fn start(invocation: &Invocation, store: ConversationStore) -> Result<Self, SessionError> {
        store.ensure_ready()?;

        let mut resumed_from = None;
        let mut messages = if invocation.continue_conversation {
            let last = store.last_fingerprint()?;
            let messages = store.load(&last)?;
            debug!(fingerprint = %last, messages = messages.len(), "resuming conversation");
            resumed_from = Some(last);
            messages
        } else {
            Vec::new()
        };

        if resumed_from.is_none()
            && invocation.use_system_prompt
            && !invocation.system_prompt.trim().is_empty()
        {
            messages.push(Message::system(&invocation.system_prompt));
        }
        messages.push(Message::user(&invocation.message));

        let fingerprint = Fingerprint::of(&messages)?;
        if let Some(last) = resumed_from.as_ref()
            && *last != fingerprint
        {
            warn!(
                pointer = %last,
                computed = %fingerprint,
                "resumed conversation does not hash to its stored fingerprint"
            );
        }

        Ok(Self {
            store,
            messages,
            fingerprint,
            resumed: resumed_from.is_some(),
        })
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn is_resumed(&self) -> bool {
        self.resumed
    }

    /// Content of the most recent assistant turn, if any.
    pub fn last_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.role == Role::Assistant)
            .map(|message| message.content.as_str())
    }

    pub fn append_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn set_fingerprint(&mut self, fingerprint: Fingerprint) {
        self.fingerprint = fingerprint;
    }

    pub fn save(&self) -> Result<(), SessionError> {
        self.store.save(&self.fingerprint, &self.messages)?;
        Ok(())
    }

    /// Replace the in-memory sequence with the stored record for
    /// `fingerprint` and adopt that fingerprint. On error the session is left
    /// untouched.
    pub fn load(&mut self, fingerprint: &Fingerprint) -> Result<(), SessionError> {
        let messages = self.store.load(fingerprint)?;
        self.messages = messages;
        self.fingerprint = fingerprint.clone();
        Ok(())
    }
}
