use super::traits::{Completion, CompletionClient, CompletionFuture};
use crate::conversation::{CompletionMetadata, Message};
use crate::error::LlmError;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A request observed by [`CannedClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct CannedRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

enum CannedOutcome {
    Reply(String),
    Failure(String),
}

/// Deterministic completion client that answers from a queue.
///
/// Every call pops the next queued outcome and records the request. Replies
/// come back with OpenAI-shaped metadata so stored records look like real
/// ones. An exhausted queue is reported as an empty provider response.
#[derive(Default)]
pub struct CannedClient {
    outcomes: Mutex<VecDeque<CannedOutcome>>,
    requests: Mutex<Vec<CannedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl CannedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::new();
        for reply in replies {
            client.push_reply(reply);
        }
        client
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        lock(&self.outcomes).push_back(CannedOutcome::Reply(reply.into()));
    }

    pub fn push_failure(&self, message: impl Into<String>) {
        lock(&self.outcomes).push_back(CannedOutcome::Failure(message.into()));
    }

    pub fn requests(&self) -> Vec<CannedRequest> {
        lock(&self.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn metadata(call: usize, model: &str, reply: &str) -> CompletionMetadata {
        let payload = json!({
            "id": format!("canned-{call}"),
            "object": "chat.completion",
            "created": 0,
            "model": model,
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": reply},
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 0,
                "completion_tokens": 0,
                "total_tokens": 0
            }
        });
        match payload {
            serde_json::Value::Object(map) => map,
            _ => CompletionMetadata::new(),
        }
    }
}

impl CompletionClient for CannedClient {
    fn name(&self) -> &str {
        "canned"
    }

    fn generate_completion<'a>(
        &'a self,
        model: &'a str,
        messages: &'a [Message],
    ) -> CompletionFuture<'a> {
        Box::pin(async move {
            let call = {
                let mut requests = lock(&self.requests);
                requests.push(CannedRequest {
                    model: model.to_string(),
                    messages: messages.to_vec(),
                });
                requests.len()
            };

            match lock(&self.outcomes).pop_front() {
                Some(CannedOutcome::Reply(reply)) => Ok(Completion {
                    metadata: Self::metadata(call, model, &reply),
                    reply,
                }),
                Some(CannedOutcome::Failure(message)) => Err(LlmError::Request {
                    provider: "canned".into(),
                    message,
                }
                .into()),
                None => Err(LlmError::EmptyResponse {
                    provider: "canned".into(),
                }
                .into()),
            }
        })
    }
}
