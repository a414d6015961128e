//! Skill similarity engine: nearest-neighbor index and ternary match scoring

pub mod index;
pub mod matcher;

pub use index::SkillIndex;
pub use matcher::{MatchLevel, SkillMatch, SkillMatcher};
