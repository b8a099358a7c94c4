//! Embedding and semantic ranking for the Comps Terminal
//!
//! This crate turns composite transaction texts and query profiles into
//! vectors through the OpenAI embeddings API and ranks reference vectors
//! against a query by cosine similarity.
//!
//! ## Features
//! - Batched embedding generation with a fixed batch size and inter-batch pause
//! - Whole-call abort with the failing batch index on any API error
//! - Matrix cosine ranking with stable descending order

pub mod client;
pub mod error;
pub mod similarity;
pub mod types;

pub use client::EmbeddingClient;
pub use error::{EmbeddingError, Result};
pub use similarity::{cosine_similarity, rank_by_similarity};
pub use types::{EmbeddingVector, ScoredIndex};
