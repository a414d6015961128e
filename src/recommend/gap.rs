//! Skill gap analysis — compares user skills against recommended roles

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::matching::{MatchLevel, SkillMatcher};
use crate::recommend::Recommender;
use crate::types::{
    GapSeverity, JobRole, RequirementLevel, RoleGap, RoleRecommendation, SkillGapItem, UserProfile,
};
use std::sync::Arc;

/// Severity of one skill shortfall. Pure function of the ternary match
/// level and whether the role requires or merely prefers the skill.
fn severity(level: MatchLevel, required_level: RequirementLevel) -> GapSeverity {
    match (level, required_level) {
        (MatchLevel::Strong, _) => GapSeverity::None,
        (MatchLevel::Partial, RequirementLevel::Preferred) => GapSeverity::Low,
        (MatchLevel::Partial, RequirementLevel::Required) => GapSeverity::Medium,
        (MatchLevel::Missing, RequirementLevel::Required) => GapSeverity::High,
        (MatchLevel::Missing, RequirementLevel::Preferred) => GapSeverity::Medium,
    }
}

/// Priority 1 (most urgent) to 5, with preferred-only skills pushed one
/// step down the queue.
fn priority(severity: GapSeverity, required_level: RequirementLevel) -> u8 {
    let base = match severity {
        GapSeverity::High => 1,
        GapSeverity::Medium => 2,
        GapSeverity::Low => 3,
        GapSeverity::None => 5,
    };
    if required_level == RequirementLevel::Preferred {
        (base + 1).min(5)
    } else {
        base
    }
}

pub struct GapAnalyzer {
    matcher: Arc<SkillMatcher>,
    recommender: Arc<Recommender>,
    gap_roles: usize,
}

impl GapAnalyzer {
    pub fn new(
        matcher: Arc<SkillMatcher>,
        recommender: Arc<Recommender>,
        scoring: &ScoringConfig,
    ) -> Self {
        Self {
            matcher,
            recommender,
            gap_roles: scoring.gap_roles,
        }
    }

    /// Recommend roles for the profile and break down the skill gaps for
    /// the top few.
    pub fn analyze(&self, profile: &UserProfile, roles: &[JobRole]) -> Result<Vec<RoleGap>> {
        let recommendations = self
            .recommender
            .get_recommendations(profile, roles, self.gap_roles)?;
        self.analyze_recommendations(profile, &recommendations, roles)
    }

    /// Gap breakdown for an already-computed recommendation list.
    /// Recommendations whose role is absent from `roles` are skipped.
    pub fn analyze_recommendations(
        &self,
        profile: &UserProfile,
        recommendations: &[RoleRecommendation],
        roles: &[JobRole],
    ) -> Result<Vec<RoleGap>> {
        let user_index = if profile.skills.is_empty() {
            None
        } else {
            Some(self.matcher.build_user_index(&profile.skills)?)
        };

        let mut results = Vec::with_capacity(recommendations.len());
        for rec in recommendations {
            let Some(role) = roles.iter().find(|r| r.id == rec.role_id) else {
                continue;
            };

            let mut gaps = Vec::new();
            for (skills, required_level) in [
                (&role.required_skills, RequirementLevel::Required),
                (&role.preferred_skills, RequirementLevel::Preferred),
            ] {
                let matches =
                    self.matcher
                        .match_skills(&profile.skills, skills, user_index.as_ref())?;
                for m in matches {
                    let sev = severity(m.level, required_level);
                    gaps.push(SkillGapItem {
                        skill: m.skill,
                        required_level,
                        user_level: m.level.score(),
                        user_level_label: m.level.label(),
                        gap_severity: sev,
                        priority: priority(sev, required_level),
                    });
                }
            }

            // Most urgent first; stable, so required skills come before
            // preferred ones at equal priority.
            gaps.sort_by_key(|g| g.priority);

            results.push(RoleGap {
                role_id: rec.role_id,
                role_title: rec.title.clone(),
                match_score: rec.match_score,
                gaps,
            });
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_table() {
        use GapSeverity::*;
        use RequirementLevel::*;

        assert_eq!(severity(MatchLevel::Strong, Required), None);
        assert_eq!(severity(MatchLevel::Strong, Preferred), None);
        assert_eq!(severity(MatchLevel::Partial, Preferred), Low);
        assert_eq!(severity(MatchLevel::Partial, Required), Medium);
        assert_eq!(severity(MatchLevel::Missing, Required), High);
        assert_eq!(severity(MatchLevel::Missing, Preferred), Medium);
    }

    #[test]
    fn test_priority_clamped_for_preferred() {
        use RequirementLevel::*;

        assert_eq!(priority(GapSeverity::High, Required), 1);
        assert_eq!(priority(GapSeverity::Medium, Required), 2);
        assert_eq!(priority(GapSeverity::Low, Required), 3);
        assert_eq!(priority(GapSeverity::None, Required), 5);

        assert_eq!(priority(GapSeverity::Medium, Preferred), 3);
        assert_eq!(priority(GapSeverity::Low, Preferred), 4);
        // Already at the floor of the queue
        assert_eq!(priority(GapSeverity::None, Preferred), 5);
    }

    #[test]
    fn test_missing_required_is_always_high() {
        assert_eq!(
            severity(MatchLevel::Missing, RequirementLevel::Required),
            GapSeverity::High
        );
    }
}
