//! Speech provider implementations

pub mod murf;
pub mod openai;
