//! Match Scorer — compares one student profile with one role's requirements.
//!
//! Default: `CompetencyScorer` with `MatchWeights::default()`.
//! `AppState` holds an `Arc<dyn MatchScorer>` so handlers never name the
//! concrete scorer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matching::profile::{RoleRequirement, StudentProfile};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// An unmet requirement, kept in requirement order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    pub name: String,
    pub required: bool,
    pub needed_level: i32,
    pub student_level: i32,
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing: {} (needs level {}, has {})",
            self.name, self.needed_level, self.student_level
        )
    }
}

/// Score and gap list for one (student, role) pair. Recomputed per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u32, // 0 – 100
    pub gaps: Vec<Gap>,
}

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

/// Point table for the additive score. Penalties are stored as positive
/// magnitudes and subtracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWeights {
    pub baseline: i32,
    pub same_city: i32,
    pub required_met: i32,
    pub optional_met: i32,
    pub verified_met: i32,
    pub required_missed: i32,
    pub optional_missed: i32,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            baseline: 50,
            same_city: 10,
            required_met: 12,
            optional_met: 6,
            verified_met: 2,
            required_missed: 18,
            optional_missed: 4,
        }
    }
}

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores a student against a role. Implementations are pure: no I/O and no
/// shared mutable state, so calls may run concurrently.
pub trait MatchScorer: Send + Sync {
    fn score(
        &self,
        student_city: Option<&str>,
        role_city: Option<&str>,
        profile: &StudentProfile,
        requirements: &[RoleRequirement],
    ) -> MatchResult;
}

/// Additive competency scorer.
#[derive(Debug, Clone, Default)]
pub struct CompetencyScorer {
    pub weights: MatchWeights,
}

impl MatchScorer for CompetencyScorer {
    fn score(
        &self,
        student_city: Option<&str>,
        role_city: Option<&str>,
        profile: &StudentProfile,
        requirements: &[RoleRequirement],
    ) -> MatchResult {
        compute_match_score(&self.weights, student_city, role_city, profile, requirements)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Algorithm:
/// 1. Start at `baseline`.
/// 2. `same_city` bonus when both cities are present and equal ignoring case
///    and surrounding whitespace.
/// 3. For each requirement, in the order given: a student level at or above
///    `min_level` earns `required_met`/`optional_met`, plus `verified_met` for
///    a verified record. Otherwise `required_missed`/`optional_missed` is
///    subtracted and a gap is recorded. Unrecorded competencies count as
///    level 0, unverified.
/// 4. Clamp the total to [0, 100] once, at the end.
pub fn compute_match_score(
    weights: &MatchWeights,
    student_city: Option<&str>,
    role_city: Option<&str>,
    profile: &StudentProfile,
    requirements: &[RoleRequirement],
) -> MatchResult {
    let mut score = weights.baseline;
    let mut gaps = Vec::new();

    if same_city(student_city, role_city) {
        score += weights.same_city;
    }

    for req in requirements {
        let (student_level, verified) = profile
            .get(req.competency_id)
            .map(|s| (s.level, s.verified))
            .unwrap_or((0, false));

        if student_level >= req.min_level {
            score += if req.required {
                weights.required_met
            } else {
                weights.optional_met
            };
            if verified {
                score += weights.verified_met;
            }
        } else {
            score -= if req.required {
                weights.required_missed
            } else {
                weights.optional_missed
            };
            gaps.push(Gap {
                name: req.name.clone(),
                required: req.required,
                needed_level: req.min_level,
                student_level,
            });
        }
    }

    MatchResult {
        score: score.clamp(MIN_SCORE, MAX_SCORE) as u32,
        gaps,
    }
}

/// Blank or missing cities never match.
fn same_city(a: Option<&str>, b: Option<&str>) -> bool {
    match (a.map(str::trim), b.map(str::trim)) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => {
            a.to_lowercase() == b.to_lowercase()
        }
        _ => false,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::profile::{build_student_profile, sort_requirements, SkillRecord};

    fn skill(id: i64, level: i32, verified: bool) -> SkillRecord {
        SkillRecord {
            competency_id: id,
            level,
            verified,
            name: format!("Competency {id}"),
            category: Some("General".to_string()),
        }
    }

    fn req(id: i64, min_level: i32, required: bool, category: &str, name: &str) -> RoleRequirement {
        RoleRequirement {
            competency_id: id,
            min_level,
            required,
            name: name.to_string(),
            category: Some(category.to_string()),
        }
    }

    fn score(
        student_city: Option<&str>,
        role_city: Option<&str>,
        skills: Vec<SkillRecord>,
        requirements: &[RoleRequirement],
    ) -> MatchResult {
        CompetencyScorer::default().score(
            student_city,
            role_city,
            &build_student_profile(skills),
            requirements,
        )
    }

    #[test]
    fn test_scenario_a_required_met_verified_same_city() {
        let reqs = vec![req(1, 3, true, "Web Development", "HTML")];
        let result = score(Some("Jakarta"), Some("Jakarta"), vec![skill(1, 4, true)], &reqs);

        assert_eq!(result.score, 74);
        assert!(result.gaps.is_empty());
    }

    #[test]
    fn test_scenario_b_required_missing_different_city() {
        let reqs = vec![req(1, 3, true, "Web Development", "HTML")];
        let result = score(Some("Bekasi"), Some("Jakarta"), vec![], &reqs);

        assert_eq!(result.score, 32);
        assert_eq!(
            result.gaps,
            vec![Gap {
                name: "HTML".to_string(),
                required: true,
                needed_level: 3,
                student_level: 0,
            }]
        );
    }

    #[test]
    fn test_scenario_c_optional_met_unverified_no_cities() {
        let reqs = vec![req(1, 2, false, "Soft Skills", "Teamwork")];
        let result = score(None, None, vec![skill(1, 2, false)], &reqs);

        assert_eq!(result.score, 56);
        assert!(result.gaps.is_empty());
    }

    #[test]
    fn test_scenario_d_clamped_at_100() {
        let reqs: Vec<_> = (1..=10)
            .map(|i| req(i, 3, true, "Tools", &format!("Tool {i}")))
            .collect();
        let skills = (1..=10).map(|i| skill(i, 5, true)).collect();

        let result = score(Some("Bandung"), Some("bandung"), skills, &reqs);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_scenario_e_clamped_at_0() {
        let reqs: Vec<_> = (1..=10)
            .map(|i| req(i, 3, true, "Tools", &format!("Tool {i}")))
            .collect();

        let result = score(None, None, vec![], &reqs);
        assert_eq!(result.score, 0);
        assert_eq!(result.gaps.len(), 10);
    }

    #[test]
    fn test_clamp_applies_once_at_the_end() {
        // 50 - 18*3 = -4 would clamp to 0 midway; the later +12*2 must still count.
        let reqs = vec![
            req(1, 3, true, "A", "a1"),
            req(2, 3, true, "A", "a2"),
            req(3, 3, true, "A", "a3"),
            req(4, 3, true, "B", "b1"),
            req(5, 3, true, "B", "b2"),
        ];
        let result = score(None, None, vec![skill(4, 3, false), skill(5, 3, false)], &reqs);
        assert_eq!(result.score, 20);
    }

    #[test]
    fn test_no_requirements_lands_at_baseline() {
        assert_eq!(score(None, None, vec![skill(1, 5, true)], &[]).score, 50);
        assert_eq!(score(Some("Surabaya"), Some("Surabaya"), vec![], &[]).score, 60);
    }

    #[test]
    fn test_city_comparison_trims_and_ignores_case() {
        assert_eq!(score(Some("  jakarta "), Some("JAKARTA"), vec![], &[]).score, 60);
        assert_eq!(score(Some("Jakarta"), Some("Bekasi"), vec![], &[]).score, 50);
    }

    #[test]
    fn test_blank_or_missing_city_gives_no_bonus() {
        assert_eq!(score(Some(""), Some(""), vec![], &[]).score, 50);
        assert_eq!(score(Some("   "), Some(" "), vec![], &[]).score, 50);
        assert_eq!(score(Some("Jakarta"), None, vec![], &[]).score, 50);
        assert_eq!(score(None, Some("Jakarta"), vec![], &[]).score, 50);
    }

    #[test]
    fn test_verified_bonus_only_on_satisfied_requirement() {
        let reqs = vec![req(1, 4, false, "Tools", "Git")];
        let below = score(None, None, vec![skill(1, 3, true)], &reqs);
        assert_eq!(below.score, 46);
        assert_eq!(below.gaps[0].student_level, 3);

        let met = score(None, None, vec![skill(1, 4, true)], &reqs);
        assert_eq!(met.score, 58);
    }

    #[test]
    fn test_optional_gap_penalty() {
        let reqs = vec![req(1, 2, false, "Design", "UI/UX Basics")];
        let result = score(None, None, vec![skill(1, 1, false)], &reqs);
        assert_eq!(result.score, 46);
        assert!(!result.gaps[0].required);
    }

    #[test]
    fn test_gaps_count_equals_unsatisfied_requirements() {
        let reqs = vec![
            req(1, 3, true, "Web Development", "CSS"),
            req(2, 3, true, "Web Development", "HTML"),
            req(3, 2, false, "Design", "UI/UX Basics"),
            req(4, 3, false, "Soft Skills", "Communication"),
        ];
        let skills = vec![skill(1, 4, false), skill(4, 2, true)];
        let result = score(None, None, skills, &reqs);

        let gap_names: Vec<_> = result.gaps.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(gap_names, vec!["HTML", "UI/UX Basics", "Communication"]);
    }

    #[test]
    fn test_gap_order_follows_requirement_order_not_skill_order() {
        let mut reqs = vec![
            req(3, 2, false, "Tools", "Git Basics"),
            req(1, 3, true, "Web Development", "HTML"),
            req(2, 3, true, "Web Development", "CSS"),
            req(4, 2, false, "Design", "UI/UX Basics"),
        ];
        sort_requirements(&mut reqs);

        let forward = score(None, None, vec![skill(9, 1, false), skill(8, 1, false)], &reqs);
        let backward = score(None, None, vec![skill(8, 1, false), skill(9, 1, false)], &reqs);

        let gap_names: Vec<_> = forward.gaps.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(gap_names, vec!["CSS", "HTML", "UI/UX Basics", "Git Basics"]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_raising_a_level_never_lowers_the_score() {
        let reqs = vec![
            req(1, 3, true, "A", "one"),
            req(2, 2, false, "B", "two"),
            req(3, 5, true, "C", "three"),
        ];
        for verified in [false, true] {
            for other in 0..=5 {
                let mut previous = 0;
                for level in 0..=5 {
                    let mut skills = vec![skill(2, other.max(1), false)];
                    if level > 0 {
                        skills.push(skill(1, level, verified));
                    }
                    let current = score(None, None, skills, &reqs).score;
                    assert!(
                        current >= previous,
                        "level {level} scored {current}, below {previous}"
                    );
                    previous = current;
                }
            }
        }
    }

    #[test]
    fn test_identical_inputs_give_identical_results() {
        let reqs = vec![
            req(1, 3, true, "Web Development", "HTML"),
            req(2, 2, false, "Tools", "Git Basics"),
        ];
        let first = score(Some("Jakarta"), Some("Jakarta"), vec![skill(2, 3, true)], &reqs);
        let second = score(Some("Jakarta"), Some("Jakarta"), vec![skill(2, 3, true)], &reqs);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_weights_are_honoured() {
        let scorer = CompetencyScorer {
            weights: MatchWeights {
                same_city: 0,
                ..MatchWeights::default()
            },
        };
        let result = scorer.score(
            Some("Jakarta"),
            Some("Jakarta"),
            &StudentProfile::default(),
            &[],
        );
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_gap_display() {
        let gap = Gap {
            name: "SQL".to_string(),
            required: true,
            needed_level: 3,
            student_level: 1,
        };
        assert_eq!(gap.to_string(), "missing: SQL (needs level 3, has 1)");
    }
}
