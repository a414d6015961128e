//! Hybrid job recommender combining content-based and rule-based scoring

use crate::config::{CacheConfig, ScoringConfig};
use crate::error::Result;
use crate::matching::SkillMatcher;
use crate::recommend::RecommendationCache;
use crate::types::{JobRole, MatchQuality, RoleRecommendation, UserProfile};
use std::sync::Arc;
use std::time::Duration;

/// Education levels ranked for the rule score. Unknown or absent levels
/// rank below everything.
fn education_rank(level: Option<&str>) -> i32 {
    match level.map(|l| l.to_lowercase()).as_deref() {
        Some("diploma") => 1,
        Some("bachelor") => 2,
        Some("master") => 3,
        Some("phd") => 4,
        _ => 0,
    }
}

pub struct Recommender {
    matcher: Arc<SkillMatcher>,
    scoring: ScoringConfig,
    cache: RecommendationCache,
}

impl Recommender {
    pub fn new(matcher: Arc<SkillMatcher>, scoring: ScoringConfig, cache: &CacheConfig) -> Self {
        Self {
            matcher,
            scoring,
            cache: RecommendationCache::new(Duration::from_secs(cache.ttl_secs), cache.capacity),
        }
    }

    pub fn default_top_n(&self) -> usize {
        self.scoring.default_top_n
    }

    /// Score every role against the profile and return the top `top_n`
    /// recommendations, best first. Results are cached by a fingerprint of
    /// the inputs for the configured TTL; a cache miss reproduces the
    /// identical result.
    pub fn get_recommendations(
        &self,
        profile: &UserProfile,
        roles: &[JobRole],
        top_n: usize,
    ) -> Result<Vec<RoleRecommendation>> {
        let key = RecommendationCache::fingerprint(profile, roles, top_n);
        if let Some(cached) = self.cache.get(key) {
            log::debug!("Recommendation cache hit for profile {}", profile.id);
            return Ok(cached);
        }

        // One index per profile, reused across every role scored below.
        let user_index = if profile.skills.is_empty() {
            None
        } else {
            Some(self.matcher.build_user_index(&profile.skills)?)
        };

        let mut scored = Vec::with_capacity(roles.len());
        for role in roles {
            let all_role_skills = union_skills(&role.required_skills, &role.preferred_skills);

            let content_score = self.matcher.compute_content_similarity(
                &profile.skills,
                &all_role_skills,
                user_index.as_ref(),
            )?;
            let rule_score = self.rule_score(profile, role);
            let cs_bonus = self.career_switcher_bonus(profile, role);

            let match_score = self.scoring.content_weight * content_score
                + self.scoring.rule_weight * rule_score
                + self.scoring.career_switcher_weight * cs_bonus;

            let matches = self.matcher.match_skills(
                &profile.skills,
                &role.required_skills,
                user_index.as_ref(),
            )?;
            let matched: Vec<String> = matches
                .iter()
                .filter(|m| m.level.is_matched())
                .map(|m| m.skill.clone())
                .collect();
            let missing: Vec<String> = matches
                .iter()
                .filter(|m| !m.level.is_matched())
                .map(|m| m.skill.clone())
                .collect();

            let rationale = build_rationale(&matched, &missing, cs_bonus);

            scored.push(RoleRecommendation {
                role_id: role.id,
                title: role.title.clone(),
                category: role.category.clone(),
                match_score: round3(match_score),
                content_score: round3(content_score),
                rule_score: round3(rule_score),
                career_switcher_bonus: round3(cs_bonus),
                matched_skills: matched,
                missing_skills: missing,
                rationale,
                salary_range: role.salary_range.clone(),
                skill_match_quality: skill_match_quality(content_score),
            });
        }

        // Stable sort keeps input order for equal scores.
        scored.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_n);

        self.cache.insert(key, scored.clone());
        Ok(scored)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Rule-based score over education and experience, each contributing
    /// 0.5 when satisfied or 0.25 when exactly one rank/year short.
    fn rule_score(&self, profile: &UserProfile, role: &JobRole) -> f32 {
        let mut score = 0.0;

        let user_ed = education_rank(profile.education.as_deref());
        let role_ed = education_rank(Some(role.education_level.as_str()));
        if user_ed >= role_ed {
            score += 0.5;
        } else if user_ed == role_ed - 1 {
            score += 0.25;
        }

        if profile.years_experience >= role.min_experience_years {
            score += 0.5;
        } else if profile.years_experience >= role.min_experience_years - 1 {
            score += 0.25;
        }

        score
    }

    /// Career-switcher bonus tapering linearly with experience: the boost
    /// matters most for the least experienced and reaches zero at 10+ years.
    fn career_switcher_bonus(&self, profile: &UserProfile, role: &JobRole) -> f32 {
        if profile.is_career_switcher && role.career_switcher_friendly {
            (1.0 - profile.years_experience as f32 * self.scoring.switcher_taper_per_year).max(0.0)
        } else {
            0.0
        }
    }
}

/// Required and preferred skills combined, deduplicated case-insensitively
/// while preserving first-seen order.
fn union_skills(required: &[String], preferred: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    required
        .iter()
        .chain(preferred.iter())
        .filter(|s| seen.insert(s.to_lowercase()))
        .cloned()
        .collect()
}

fn skill_match_quality(content_score: f32) -> MatchQuality {
    if content_score >= 0.7 {
        MatchQuality::Strong
    } else if content_score >= 0.4 {
        MatchQuality::Moderate
    } else {
        MatchQuality::Developing
    }
}

fn build_rationale(matched: &[String], missing: &[String], cs_bonus: f32) -> String {
    let mut parts = Vec::new();
    if !matched.is_empty() {
        let shown: Vec<&str> = matched.iter().take(3).map(|s| s.as_str()).collect();
        parts.push(format!("Strong in: {}", shown.join(", ")));
    }
    if !missing.is_empty() {
        let shown: Vec<&str> = missing.iter().take(3).map(|s| s.as_str()).collect();
        parts.push(format!("Gaps in: {}", shown.join(", ")));
    }
    if cs_bonus > 0.0 {
        parts.push("Career-switcher friendly role".to_string());
    }
    if parts.is_empty() {
        "General match".to_string()
    } else {
        parts.join(". ")
    }
}

fn round3(x: f32) -> f32 {
    (x * 1000.0).round() / 1000.0
}
