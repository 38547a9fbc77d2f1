//! Domain entities - Objects with identity and lifecycle

mod message;
mod session;

pub use message::{Message, MessageRole};
pub use session::{DEFAULT_MAX_MESSAGES, Session};
