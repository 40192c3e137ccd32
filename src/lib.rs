//! Retrieval-augmented chat backend for professor reviews.
//!
//! One HTTP endpoint takes a conversation, retrieves relevant reviews
//! from a vector index and streams a grounded model answer back.

pub mod config;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod rag;
pub mod server;
pub mod state;
