pub mod document;
pub mod types;

pub use document::{Document, ImageArtifact};
pub use types::{ChatMessage, MessageRole};
