//! Camunda Core Domain Types
//!
//! This crate contains the entities returned by the Camunda 7 REST API and
//! the codec translating them to and from the engine's JSON shape. It has no
//! dependencies on:
//! - Network/HTTP
//! - Runtime specifics
//!
//! Entities are plain immutable values decoded from a single response element.

pub mod codec;
pub mod comment;
pub mod error;
pub mod process;
pub mod task;

// Re-export commonly used types
pub use codec::{decode_list, format_timestamp, parse_timestamp, Entity};
pub use comment::Comment;
pub use error::DecodeError;
pub use process::ProcessInstance;
pub use task::Task;
