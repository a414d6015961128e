//! Value types shared across the recommendation pipeline
//!
//! Inputs (`UserProfile`, `JobRole`, `Course`) arrive from the surrounding
//! service layer; outputs (`RoleRecommendation`, `RoleGap`, `RoadmapItem`)
//! are plain data the caller serializes however it wants.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub years_experience: i32,
    #[serde(default)]
    pub is_career_switcher: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRole {
    pub id: i64,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub min_experience_years: i32,
    #[serde(default = "default_education_level")]
    pub education_level: String,
    #[serde(default)]
    pub career_switcher_friendly: bool,
    #[serde(default)]
    pub salary_range: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub provider: String,
    #[serde(default)]
    pub skills_taught: Vec<String>,
    pub duration_weeks: u32,
    #[serde(default = "default_course_level")]
    pub level: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub certification: Option<String>,
    #[serde(default)]
    pub course_fee: f64,
    #[serde(default)]
    pub subsidy_percent: Option<f64>,
    #[serde(default)]
    pub mces_eligible: bool,
    #[serde(default = "default_true")]
    pub skillsfuture_eligible: bool,
}

fn default_education_level() -> String {
    "bachelor".to_string()
}

fn default_course_level() -> String {
    "intermediate".to_string()
}

fn default_true() -> bool {
    true
}

/// How well the user's skill set covers a role, bucketed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchQuality {
    Strong,
    Moderate,
    Developing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementLevel {
    Required,
    Preferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapSeverity {
    None,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevelLabel {
    Missing,
    Partial,
    Strong,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRecommendation {
    pub role_id: i64,
    pub title: String,
    pub category: String,
    pub match_score: f32,
    pub content_score: f32,
    pub rule_score: f32,
    pub career_switcher_bonus: f32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub rationale: String,
    pub salary_range: Option<String>,
    pub skill_match_quality: MatchQuality,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapItem {
    pub skill: String,
    pub required_level: RequirementLevel,
    /// 0.0, 0.5 or 1.0 — the ternary match score for this skill.
    pub user_level: f32,
    pub user_level_label: SkillLevelLabel,
    pub gap_severity: GapSeverity,
    /// 1 = most urgent, 5 = no action needed.
    pub priority: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleGap {
    pub role_id: i64,
    pub role_title: String,
    pub match_score: f32,
    pub gaps: Vec<SkillGapItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub skill: String,
    pub course_title: String,
    pub provider: String,
    pub duration_weeks: u32,
    pub level: String,
    pub url: Option<String>,
    pub certification: Option<String>,
    pub priority: u8,
    pub week_start: u32,
    pub week_end: u32,
    pub skillsfuture_eligible: bool,
    pub skillsfuture_credit_amount: f64,
    pub course_fee: f64,
    pub nett_fee_after_subsidy: f64,
}

/// Full subsidy arithmetic for one course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsidyBreakdown {
    pub course_fee: f64,
    pub subsidy_percent: f64,
    pub subsidy_amount: f64,
    pub mces_applied: bool,
    pub sfc_applicable: f64,
    pub nett_payable: f64,
}
