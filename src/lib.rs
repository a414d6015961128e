//! Skillbridge: semantic skill matching and job-role recommendation
//!
//! The pipeline runs Embedding -> Taxonomy normalization -> Skill matching
//! -> {Hybrid recommendation, Gap analysis} -> Roadmap generation. All
//! services are explicitly constructed and shared via `Arc`; nothing lives
//! in module-level mutable state.

pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod matching;
pub mod recommend;
pub mod taxonomy;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use error::{Result, SkillBridgeError};
