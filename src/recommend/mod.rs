//! Hybrid recommendation, gap analysis, and upskilling roadmap generation

pub mod cache;
pub mod gap;
pub mod recommender;
pub mod roadmap;
pub mod subsidy;

pub use cache::RecommendationCache;
pub use gap::GapAnalyzer;
pub use recommender::Recommender;
pub use roadmap::RoadmapGenerator;
pub use subsidy::calculate_subsidies;
