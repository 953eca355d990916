// src/gpa/planner.rs
use super::{aggregate, round2, GradedCredit};
use serde::{Deserialize, Serialize};

/// Highest grade point on the scale; anything required above it is out of reach.
pub const MAX_GRADE_POINT: f64 = 4.0;

/// User input for the target planner.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TargetPlan {
    pub target_cgpa: f64,
    pub remaining_semesters: i64,
    pub avg_credits_per_semester: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    NotApplicable,
    NotAchievable,
    Challenging,
    Moderate,
    Achievable,
}

impl Difficulty {
    /// Buckets a (rounded) required GPA.
    pub fn classify(required_gpa: f64) -> Self {
        if required_gpa > MAX_GRADE_POINT {
            Difficulty::NotAchievable
        } else if required_gpa > 3.5 {
            Difficulty::Challenging
        } else if required_gpa > 3.0 {
            Difficulty::Moderate
        } else {
            Difficulty::Achievable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::NotApplicable => "Not applicable",
            Difficulty::NotAchievable => "Not achievable",
            Difficulty::Challenging => "Challenging",
            Difficulty::Moderate => "Moderate",
            Difficulty::Achievable => "Achievable",
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Difficulty::NotApplicable => "Enter at least one remaining semester with credits to plan ahead.",
            Difficulty::NotAchievable => "Your target CGPA exceeds the maximum possible (4.00). Consider adjusting your target or increasing remaining semesters.",
            Difficulty::Challenging => "This goal is challenging but achievable! Focus on your strongest subjects and seek help early if needed.",
            Difficulty::Moderate => "Your target is realistic. Stay consistent with your studies and maintain good study habits.",
            Difficulty::Achievable => "Great news! Your target is very achievable with consistent effort. Keep up the good work!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetOutcome {
    pub current_cgpa: f64,
    pub current_credits: i64,
    pub target_cgpa: f64,
    pub remaining_credits: f64,
    pub required_gpa: f64,
    pub achievable: bool,
    pub difficulty: Difficulty,
    pub cgpa_increase_needed: f64,
}

/// GPA needed over the remaining credits to land exactly on `target_cgpa`.
///
/// Returns 0 when there are no remaining credits; callers decide how to
/// present that case.
pub fn required_future_gpa(
    current_points: f64,
    current_credits: i64,
    target_cgpa: f64,
    remaining_semesters: i64,
    avg_credits_per_semester: f64,
) -> f64 {
    let remaining_credits = remaining_semesters as f64 * avg_credits_per_semester;
    round2(solve_required_gpa(
        current_points,
        current_credits as f64,
        target_cgpa,
        remaining_credits,
    ))
}

/// Un-rounded form of [`required_future_gpa`]. Decisions are made on this
/// value; only what is shown gets rounded.
fn solve_required_gpa(
    current_points: f64,
    current_credits: f64,
    target_cgpa: f64,
    remaining_credits: f64,
) -> f64 {
    if remaining_credits <= 0.0 {
        return 0.0;
    }
    let target_total_points = target_cgpa * (current_credits + remaining_credits);
    (target_total_points - current_points) / remaining_credits
}

/// Runs the planner against a student's recorded results.
pub fn plan_target<T: GradedCredit>(results: &[T], plan: &TargetPlan) -> TargetOutcome {
    let current_points = aggregate::total_points(results);
    let current_credits = aggregate::total_credits(results);
    let current_cgpa = aggregate::cumulative_gpa(results);
    let remaining_credits = plan.remaining_semesters as f64 * plan.avg_credits_per_semester;

    let current_credit_sum: f64 = results.iter().map(|r| r.credit() as f64).sum();
    let required_gpa = solve_required_gpa(
        current_points,
        current_credit_sum,
        plan.target_cgpa,
        remaining_credits,
    );

    let difficulty = if remaining_credits <= 0.0 {
        Difficulty::NotApplicable
    } else {
        Difficulty::classify(required_gpa)
    };

    TargetOutcome {
        current_cgpa,
        current_credits,
        target_cgpa: plan.target_cgpa,
        remaining_credits: remaining_credits.max(0.0),
        required_gpa: round2(required_gpa),
        achievable: difficulty != Difficulty::NotApplicable && required_gpa <= MAX_GRADE_POINT,
        difficulty,
        cgpa_increase_needed: round2((plan.target_cgpa - current_cgpa).max(0.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpa::fixtures::row;

    #[test]
    fn required_gpa_example() {
        // CGPA 3.60 over 10 credits, one more 10-credit semester to reach 3.8
        assert_eq!(required_future_gpa(36.0, 10, 3.8, 1, 10.0), 4.0);
    }

    #[test]
    fn no_remaining_semesters_is_zero() {
        assert_eq!(required_future_gpa(36.0, 10, 3.8, 0, 10.0), 0.0);
        assert_eq!(required_future_gpa(36.0, 10, 3.8, -2, 10.0), 0.0);
        assert_eq!(required_future_gpa(36.0, 10, 3.8, 3, 0.0), 0.0);
    }

    #[test]
    fn difficulty_thresholds() {
        assert_eq!(Difficulty::classify(4.01), Difficulty::NotAchievable);
        assert_eq!(Difficulty::classify(4.0), Difficulty::Challenging);
        assert_eq!(Difficulty::classify(3.51), Difficulty::Challenging);
        assert_eq!(Difficulty::classify(3.5), Difficulty::Moderate);
        assert_eq!(Difficulty::classify(3.01), Difficulty::Moderate);
        assert_eq!(Difficulty::classify(3.0), Difficulty::Achievable);
        assert_eq!(Difficulty::classify(-1.0), Difficulty::Achievable);
    }

    #[test]
    fn plan_from_results_at_the_edge_of_the_scale() {
        // 3.60 over 10 credits
        let results = [row(4.0, 6, "Y1S1"), row(3.0, 4, "Y1S2")];
        let plan = TargetPlan {
            target_cgpa: 3.8,
            remaining_semesters: 1,
            avg_credits_per_semester: 10.0,
        };
        let outcome = plan_target(&results, &plan);
        assert_eq!(outcome.current_cgpa, 3.6);
        assert_eq!(outcome.current_credits, 10);
        assert_eq!(outcome.remaining_credits, 10.0);
        assert_eq!(outcome.required_gpa, 4.0);
        assert!(outcome.achievable);
        assert_eq!(outcome.difficulty, Difficulty::Challenging);
        assert_eq!(outcome.cgpa_increase_needed, 0.2);
    }

    #[test]
    fn decision_uses_the_unrounded_requirement() {
        // both need roughly 4.00 once rounded, but only one fits on the scale
        let results = [row(4.0, 6, "Y1S1"), row(3.0, 4, "Y1S2")];
        let plan = |avg_credits_per_semester| TargetPlan {
            target_cgpa: 3.8,
            remaining_semesters: 1,
            avg_credits_per_semester,
        };

        let over = plan_target(&results, &plan(9.8));
        assert_eq!(over.required_gpa, 4.0);
        assert!(!over.achievable);
        assert_eq!(over.difficulty, Difficulty::NotAchievable);

        let under = plan_target(&results, &plan(10.2));
        assert_eq!(under.required_gpa, 4.0);
        assert!(under.achievable);
        assert_eq!(under.difficulty, Difficulty::Challenging);
    }

    #[test]
    fn unreachable_target_is_flagged() {
        let results = [row(2.0, 30, "Y1S1")];
        let plan = TargetPlan {
            target_cgpa: 3.9,
            remaining_semesters: 1,
            avg_credits_per_semester: 15.0,
        };
        let outcome = plan_target(&results, &plan);
        assert!(outcome.required_gpa > 4.0);
        assert!(!outcome.achievable);
        assert_eq!(outcome.difficulty, Difficulty::NotAchievable);
    }

    #[test]
    fn plan_without_remaining_credits_is_not_applicable() {
        let results = [row(3.0, 3, "Y1S1")];
        let plan = TargetPlan {
            target_cgpa: 3.5,
            remaining_semesters: 0,
            avg_credits_per_semester: 15.0,
        };
        let outcome = plan_target(&results, &plan);
        assert_eq!(outcome.required_gpa, 0.0);
        assert_eq!(outcome.difficulty, Difficulty::NotApplicable);
        assert!(!outcome.achievable);
    }

    #[test]
    fn target_below_current_needs_no_increase() {
        let results = [row(4.0, 10, "Y1S1")];
        let plan = TargetPlan {
            target_cgpa: 3.0,
            remaining_semesters: 2,
            avg_credits_per_semester: 10.0,
        };
        let outcome = plan_target(&results, &plan);
        assert_eq!(outcome.cgpa_increase_needed, 0.0);
        assert_eq!(outcome.difficulty, Difficulty::Achievable);
    }
}
