pub mod fingerprint;
pub mod message;
pub mod session;
pub mod store;
pub mod transcript;

pub use fingerprint::Fingerprint;
pub use message::{CompletionMetadata, Message, Role};
pub use session::ConversationSession;
pub use store::ConversationStore;
pub use transcript::render_markdown;
