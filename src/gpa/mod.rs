// src/gpa/mod.rs
//! Pure GPA aggregation and planning.
//!
//! Nothing in here touches the database, the session or the network: the
//! web layer loads the records, hands them over as slices and serializes
//! whatever comes back. All GPA values leave these functions rounded to two
//! decimals, while the sums behind them are kept un-rounded.

pub mod aggregate;
pub mod grade;
pub mod insight;
pub mod planner;
pub mod stats;

pub use aggregate::{
    cumulative_gpa, group_by_semester, semester_gpa, semester_trend_series, total_credits,
    total_points, SemesterGpa, Trend, UNKNOWN_SEMESTER,
};
pub use grade::{grade_to_point, Grade, InvalidGradeError};
pub use planner::{plan_target, required_future_gpa, Difficulty, TargetOutcome, TargetPlan};
pub use stats::{grade_distribution, pass_rate, GradeCount};

/// A record that carries enough information to take part in a weighted GPA.
///
/// Implemented by the persisted result rows; tests implement it on plain
/// tuples-like structs.
pub trait GradedCredit {
    fn grade_point(&self) -> f64;
    fn credit(&self) -> i64;
    /// Semester token such as `Y1S2`. `None` (or blank) means unknown.
    fn semester(&self) -> Option<&str>;
}

impl<T: GradedCredit + ?Sized> GradedCredit for &T {
    fn grade_point(&self) -> f64 {
        (**self).grade_point()
    }
    fn credit(&self) -> i64 {
        (**self).credit()
    }
    fn semester(&self) -> Option<&str> {
        (**self).semester()
    }
}

/// Rounds to two decimals. Only ever applied to a function's final output.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::GradedCredit;

    #[derive(Debug, Clone)]
    pub struct Row {
        pub grade_point: f64,
        pub credit: i64,
        pub semester: Option<String>,
    }

    pub fn row(grade_point: f64, credit: i64, semester: &str) -> Row {
        Row {
            grade_point,
            credit,
            semester: Some(semester.to_string()),
        }
    }

    impl GradedCredit for Row {
        fn grade_point(&self) -> f64 {
            self.grade_point
        }
        fn credit(&self) -> i64 {
            self.credit
        }
        fn semester(&self) -> Option<&str> {
            self.semester.as_deref()
        }
    }
}
