pub mod canned;
pub mod http_client;
pub mod openai;
pub mod scrub;
pub mod traits;

pub use canned::{CannedClient, CannedRequest};
pub use http_client::build_provider_client_with_timeout;
pub use openai::OpenAiClient;
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::{Completion, CompletionClient, CompletionFuture};
