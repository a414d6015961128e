//! Configuration management for the skillbridge engine
//!
//! Every tuning value used by the scoring pipeline lives here rather than as
//! a hard constant: the thresholds and weights are product decisions, not
//! algorithmic ones, and operators adjust them via the TOML config file.

use crate::error::{Result, SkillBridgeError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub matching: MatchingConfig,
    pub scoring: ScoringConfig,
    pub cache: CacheConfig,
    pub subsidy: SubsidyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub default_embedding_model: String,
}

/// Thresholds and category weights for the skill similarity engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Cosine similarity at or above which a skill counts as a strong match.
    pub strong_threshold: f32,
    /// Cosine similarity at or above which a skill counts as a partial match.
    pub partial_threshold: f32,
    /// Minimum similarity for taxonomy normalization to accept a canonical name.
    pub normalization_threshold: f32,
    /// Per-category weights applied when averaging match scores.
    pub category_weights: HashMap<String, f32>,
    /// Weight used for skills whose category is not in the weight table.
    pub default_category_weight: f32,
}

/// Weights and tuning values for the hybrid recommender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub content_weight: f32,
    pub rule_weight: f32,
    pub career_switcher_weight: f32,
    /// How much of the career-switcher bonus is lost per year of experience.
    pub switcher_taper_per_year: f32,
    pub default_top_n: usize,
    /// How many recommended roles the gap analyzer inspects.
    pub gap_roles: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsidyConfig {
    /// SkillsFuture Credit applicable per person.
    pub skillsfuture_credit_cap: f64,
    /// MCES-enhanced subsidy percentage for eligible career switchers.
    pub mces_subsidy_percent: f64,
    /// Fallback subsidy percentage for courses that do not declare one.
    pub default_subsidy_percent: f64,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".skillbridge")
            .join("models");

        let mut category_weights = HashMap::new();
        category_weights.insert("critical_core".to_string(), 1.3);
        category_weights.insert("technical".to_string(), 1.0);
        category_weights.insert("generic".to_string(), 0.8);

        Self {
            models: ModelConfig {
                models_dir,
                default_embedding_model: "potion-base-8M".to_string(),
            },
            matching: MatchingConfig {
                strong_threshold: 0.85,
                partial_threshold: 0.6,
                normalization_threshold: 0.75,
                category_weights,
                default_category_weight: 1.0,
            },
            scoring: ScoringConfig {
                content_weight: 0.55,
                rule_weight: 0.25,
                career_switcher_weight: 0.20,
                switcher_taper_per_year: 0.1,
                default_top_n: 5,
                gap_roles: 3,
            },
            cache: CacheConfig {
                ttl_secs: 300,
                capacity: 256,
            },
            subsidy: SubsidyConfig {
                skillsfuture_credit_cap: 500.0,
                mces_subsidy_percent: 90.0,
                default_subsidy_percent: 70.0,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| SkillBridgeError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            SkillBridgeError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skillbridge")
            .join("config.toml")
    }

    pub fn models_dir(&self) -> &PathBuf {
        &self.models.models_dir
    }

    pub fn ensure_models_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.models.models_dir)?;
        Ok(())
    }
}

impl MatchingConfig {
    /// Weight applied to a skill in the given taxonomy category.
    pub fn category_weight(&self, category: &str) -> f32 {
        self.category_weights
            .get(category)
            .copied()
            .unwrap_or(self.default_category_weight)
    }
}
