//! Value Objects - Immutable, identity-less domain primitives

mod audio_ref;
mod session_id;

pub use audio_ref::AudioRef;
pub use session_id::SessionId;
