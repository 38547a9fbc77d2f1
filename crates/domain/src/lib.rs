//! Domain layer for the voice gateway
//!
//! Contains the conversation entities, value objects, turn outcome taxonomy,
//! and domain errors. This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod outcome;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use outcome::{ErrorKind, PipelineOutcome, PipelineStage, ServiceAvailability};
pub use value_objects::*;
