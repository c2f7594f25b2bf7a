//! Binary outputs produced by tools: a versioned artifact store scoped by
//! session, and the local directory generated images are written to.

mod images;
mod store;

pub use images::{ImageDirectory, SavedImage, extension_for_mime};
pub use store::{Artifact, ArtifactError, ArtifactStore, InMemoryArtifactStore};
