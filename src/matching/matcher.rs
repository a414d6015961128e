//! Ternary skill match scoring and weighted content similarity

use crate::config::MatchingConfig;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::matching::SkillIndex;
use crate::taxonomy::TaxonomyNormalizer;
use crate::types::SkillLevelLabel;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Per-skill match outcome. Deliberately ternary rather than a raw
/// similarity: the discrete buckets keep downstream severity classification
/// and user-facing output interpretable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchLevel {
    Strong,
    Partial,
    Missing,
}

impl MatchLevel {
    pub fn from_similarity(sim: f32, config: &MatchingConfig) -> Self {
        if sim >= config.strong_threshold {
            MatchLevel::Strong
        } else if sim >= config.partial_threshold {
            MatchLevel::Partial
        } else {
            MatchLevel::Missing
        }
    }

    pub fn score(self) -> f32 {
        match self {
            MatchLevel::Strong => 1.0,
            MatchLevel::Partial => 0.5,
            MatchLevel::Missing => 0.0,
        }
    }

    pub fn label(self) -> SkillLevelLabel {
        match self {
            MatchLevel::Strong => SkillLevelLabel::Strong,
            MatchLevel::Partial => SkillLevelLabel::Partial,
            MatchLevel::Missing => SkillLevelLabel::Missing,
        }
    }

    pub fn is_matched(self) -> bool {
        self.score() >= 0.5
    }
}

/// One target skill scored against the user's skill set. Results keep the
/// target iteration order, which downstream sorting relies on for stable
/// tie-breaks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub level: MatchLevel,
}

/// Scores target skill sets against a user's skills using embedding
/// nearest-neighbor search with an exact-text override.
pub struct SkillMatcher {
    embedder: Arc<dyn Embedder>,
    normalizer: Arc<TaxonomyNormalizer>,
    config: MatchingConfig,
}

impl SkillMatcher {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        normalizer: Arc<TaxonomyNormalizer>,
        config: MatchingConfig,
    ) -> Self {
        Self {
            embedder,
            normalizer,
            config,
        }
    }

    pub fn normalizer(&self) -> &TaxonomyNormalizer {
        &self.normalizer
    }

    /// Build an index over one user's skills for reuse across every role
    /// scored in a single recommendation pass. This turns O(roles x skills)
    /// embedding work into one index build plus O(roles) lookups.
    pub fn build_user_index(&self, user_skills: &[String]) -> Result<SkillIndex> {
        SkillIndex::build(self.embedder.as_ref(), user_skills)
    }

    /// Score each target skill against the user's skills.
    ///
    /// Exact case-insensitive text equality short-circuits to a strong
    /// match; otherwise the nearest user skill's cosine similarity is
    /// bucketed by the configured thresholds. Empty user or target sets
    /// produce all-missing results without touching the embedding model.
    pub fn match_skills(
        &self,
        user_skills: &[String],
        target_skills: &[String],
        cached_index: Option<&SkillIndex>,
    ) -> Result<Vec<SkillMatch>> {
        if target_skills.is_empty() {
            return Ok(Vec::new());
        }
        if user_skills.is_empty() {
            return Ok(target_skills
                .iter()
                .map(|skill| SkillMatch {
                    skill: skill.clone(),
                    level: MatchLevel::Missing,
                })
                .collect());
        }

        let owned_index;
        let index = match cached_index {
            Some(index) => index,
            None => {
                owned_index = self.build_user_index(user_skills)?;
                &owned_index
            }
        };

        let queries = self.embedder.encode(target_skills)?;

        let mut result = Vec::with_capacity(target_skills.len());
        for (skill, query) in target_skills.iter().zip(queries.iter()) {
            let level = if index.contains_text(skill) {
                MatchLevel::Strong
            } else {
                match index.search(query) {
                    Some((_, sim)) => MatchLevel::from_similarity(sim, &self.config),
                    None => MatchLevel::Missing,
                }
            };
            result.push(SkillMatch {
                skill: skill.clone(),
                level,
            });
        }
        Ok(result)
    }

    /// Category-weighted mean match score between the user's skills and a
    /// target skill set, in [0, 1]. Empty target sets score 0.0.
    pub fn compute_content_similarity(
        &self,
        user_skills: &[String],
        target_skills: &[String],
        cached_index: Option<&SkillIndex>,
    ) -> Result<f32> {
        if target_skills.is_empty() {
            return Ok(0.0);
        }

        let matches = self.match_skills(user_skills, target_skills, cached_index)?;

        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        for m in &matches {
            let category = self.normalizer.category_of(&m.skill);
            let weight = self.config.category_weight(category);
            weighted_sum += m.level.score() * weight;
            weight_total += weight;
        }

        if weight_total == 0.0 {
            return Ok(0.0);
        }
        Ok((weighted_sum / weight_total).clamp(0.0, 1.0))
    }
}
