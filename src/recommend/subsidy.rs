//! SkillsFuture Credit (SFC) and MCES subsidy calculation for courses

use crate::config::SubsidyConfig;
use crate::types::{Course, SubsidyBreakdown};

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Subsidy arithmetic for one course: percentage subsidy (MCES-enhanced for
/// eligible career switchers), then a SkillsFuture Credit offset capped both
/// at the per-person amount and at the post-subsidy balance. Nett payable is
/// never negative and never exceeds the course fee.
pub fn calculate_subsidies(
    course: &Course,
    is_career_switcher: bool,
    config: &SubsidyConfig,
) -> SubsidyBreakdown {
    let fee = course.course_fee.max(0.0);
    let base_pct = course
        .subsidy_percent
        .unwrap_or(config.default_subsidy_percent);

    let mces_applied = is_career_switcher && course.mces_eligible;
    let applied_pct = if mces_applied {
        config.mces_subsidy_percent
    } else {
        base_pct
    };

    let subsidy_amount = round2(fee * applied_pct / 100.0);
    let after_subsidy = round2(fee - subsidy_amount);

    let sfc = config.skillsfuture_credit_cap.min(after_subsidy).max(0.0);
    let nett_payable = round2(after_subsidy - sfc).max(0.0);

    SubsidyBreakdown {
        course_fee: fee,
        subsidy_percent: applied_pct,
        subsidy_amount,
        mces_applied,
        sfc_applicable: sfc,
        nett_payable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn course(fee: f64, subsidy_percent: Option<f64>, mces_eligible: bool) -> Course {
        Course {
            id: 1,
            title: "Test Course".to_string(),
            provider: "Test Provider".to_string(),
            skills_taught: vec![],
            duration_weeks: 8,
            level: "intermediate".to_string(),
            url: None,
            certification: None,
            course_fee: fee,
            subsidy_percent,
            mces_eligible,
            skillsfuture_eligible: true,
        }
    }

    #[test]
    fn test_standard_subsidy_breakdown() {
        // $2000 at 70%, no MCES: subsidy $1400, balance $600, SFC $500, nett $100
        let config = Config::default().subsidy;
        let result = calculate_subsidies(&course(2000.0, Some(70.0), false), true, &config);

        assert_eq!(result.subsidy_percent, 70.0);
        assert_eq!(result.subsidy_amount, 1400.0);
        assert!(!result.mces_applied);
        assert_eq!(result.sfc_applicable, 500.0);
        assert_eq!(result.nett_payable, 100.0);
    }

    #[test]
    fn test_mces_enhancement_for_switchers() {
        let config = Config::default().subsidy;
        let result = calculate_subsidies(&course(2000.0, Some(70.0), true), true, &config);

        assert!(result.mces_applied);
        assert_eq!(result.subsidy_percent, 90.0);
        assert_eq!(result.subsidy_amount, 1800.0);
        // SFC capped at the post-subsidy balance, not the $500 maximum
        assert_eq!(result.sfc_applicable, 200.0);
        assert_eq!(result.nett_payable, 0.0);
    }

    #[test]
    fn test_mces_requires_both_flags() {
        let config = Config::default().subsidy;

        let not_switcher = calculate_subsidies(&course(2000.0, Some(70.0), true), false, &config);
        assert!(!not_switcher.mces_applied);

        let not_eligible = calculate_subsidies(&course(2000.0, Some(70.0), false), true, &config);
        assert!(!not_eligible.mces_applied);
    }

    #[test]
    fn test_default_subsidy_percent() {
        let config = Config::default().subsidy;
        let result = calculate_subsidies(&course(1000.0, None, false), false, &config);
        assert_eq!(result.subsidy_percent, 70.0);
        assert_eq!(result.subsidy_amount, 700.0);
    }

    #[test]
    fn test_nett_payable_bounds() {
        let config = Config::default().subsidy;
        for fee in [0.0, 100.0, 499.0, 500.0, 2000.0, 25_000.0] {
            for pct in [0.0, 50.0, 70.0, 90.0, 100.0] {
                let result = calculate_subsidies(&course(fee, Some(pct), false), false, &config);
                assert!(result.nett_payable >= 0.0);
                assert!(result.nett_payable <= fee);
                assert!(result.sfc_applicable >= 0.0);
            }
        }
    }

    #[test]
    fn test_free_course() {
        let config = Config::default().subsidy;
        let result = calculate_subsidies(&course(0.0, Some(70.0), false), false, &config);
        assert_eq!(result.nett_payable, 0.0);
        assert_eq!(result.sfc_applicable, 0.0);
    }
}
