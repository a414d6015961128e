//! Upskilling roadmap generation — maps skill gaps to a course schedule

use crate::config::SubsidyConfig;
use crate::recommend::subsidy::calculate_subsidies;
use crate::types::{Course, GapSeverity, RoadmapItem, RoleGap, UserProfile};
use std::collections::{HashMap, HashSet};

pub struct RoadmapGenerator {
    subsidy: SubsidyConfig,
}

impl RoadmapGenerator {
    pub fn new(subsidy: SubsidyConfig) -> Self {
        Self { subsidy }
    }

    /// Turn analyzed gaps into a week-by-week course plan.
    ///
    /// High and medium severity skills across all gap-analyzed roles are
    /// deduplicated onto their most urgent priority, then greedily assigned
    /// courses that maximize coverage of the still-pending skills. Each
    /// course occupies one contiguous slot regardless of how many skills it
    /// resolves; skills no course teaches are silently omitted.
    pub fn generate_roadmap(
        &self,
        profile: &UserProfile,
        gaps: &[RoleGap],
        courses: &[Course],
    ) -> Vec<RoadmapItem> {
        // Dedup skills onto their best (lowest) priority, keeping first-seen
        // order for stable sorting.
        let mut priorities: Vec<(String, u8)> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();
        for role_gap in gaps {
            for item in &role_gap.gaps {
                if !matches!(item.gap_severity, GapSeverity::High | GapSeverity::Medium) {
                    continue;
                }
                let key = item.skill.to_lowercase();
                match seen.get(&key) {
                    Some(&i) => {
                        if item.priority < priorities[i].1 {
                            priorities[i].1 = item.priority;
                        }
                    }
                    None => {
                        seen.insert(key, priorities.len());
                        priorities.push((item.skill.clone(), item.priority));
                    }
                }
            }
        }
        priorities.sort_by_key(|&(_, p)| p);

        let mut pending: HashSet<String> = priorities
            .iter()
            .map(|(skill, _)| skill.to_lowercase())
            .collect();

        let mut roadmap = Vec::new();
        let mut used_courses: HashSet<i64> = HashSet::new();
        let mut current_week: u32 = 1;

        for (skill, priority) in &priorities {
            let key = skill.to_lowercase();
            // Already resolved by an earlier course; no additional slot.
            if !pending.contains(&key) {
                continue;
            }

            let Some(course) = self.pick_course(&key, &pending, &used_courses, courses) else {
                pending.remove(&key);
                continue;
            };

            used_courses.insert(course.id);
            for taught in &course.skills_taught {
                pending.remove(&taught.to_lowercase());
            }

            let week_end = current_week + course.duration_weeks.saturating_sub(1);
            let subsidies = calculate_subsidies(course, profile.is_career_switcher, &self.subsidy);

            roadmap.push(RoadmapItem {
                skill: skill.clone(),
                course_title: course.title.clone(),
                provider: course.provider.clone(),
                duration_weeks: course.duration_weeks,
                level: course.level.clone(),
                url: course.url.clone(),
                certification: course.certification.clone(),
                priority: *priority,
                week_start: current_week,
                week_end,
                skillsfuture_eligible: course.skillsfuture_eligible,
                skillsfuture_credit_amount: subsidies.sfc_applicable,
                course_fee: subsidies.course_fee,
                nett_fee_after_subsidy: subsidies.nett_payable,
            });
            current_week = week_end + 1;
        }

        roadmap
    }

    /// Among unused courses that teach `skill`, the one covering the most
    /// still-pending skills. Ties keep the earliest course in catalog order.
    fn pick_course<'a>(
        &self,
        skill: &str,
        pending: &HashSet<String>,
        used_courses: &HashSet<i64>,
        courses: &'a [Course],
    ) -> Option<&'a Course> {
        let mut best: Option<(&Course, usize)> = None;
        for course in courses {
            if used_courses.contains(&course.id) {
                continue;
            }
            let taught: Vec<String> = course
                .skills_taught
                .iter()
                .map(|s| s.to_lowercase())
                .collect();
            if !taught.iter().any(|t| t == skill) {
                continue;
            }
            let coverage = taught.iter().filter(|t| pending.contains(*t)).count();
            match best {
                Some((_, best_coverage)) if coverage <= best_coverage => {}
                _ => best = Some((course, coverage)),
            }
        }
        best.map(|(course, _)| course)
    }
}
