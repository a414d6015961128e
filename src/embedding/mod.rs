//! Embedding provider: model loading and text-to-vector encoding

pub mod engine;
pub mod manager;

pub use engine::{cosine_similarity, Embedder, EmbeddingEngine};
pub use manager::EmbeddingModelManager;
