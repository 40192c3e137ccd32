//! Retrieval-augmentation building blocks.
//!
//! This module provides:
//! - `Embedder` / `HfEmbedder`: text to embedding vector
//! - `VectorIndex` / `PineconeIndex`: nearest-neighbor review lookup
//! - `format_matches`: renders retrieved reviews into a context block

mod context;
mod embedder;
mod index;

pub use context::format_matches;
pub use embedder::{Embedder, HfEmbedder};
pub use index::{PineconeIndex, ReviewMatch, ReviewMetadata, VectorIndex};
