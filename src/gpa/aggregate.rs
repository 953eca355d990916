// src/gpa/aggregate.rs
use super::{round2, GradedCredit};
use serde::Serialize;
use std::collections::BTreeMap;

/// Bucket used for records without a semester token.
pub const UNKNOWN_SEMESTER: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Same,
}

/// One point of the semester-over-semester series. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterGpa {
    pub semester: String,
    pub gpa: f64,
    pub trend: Trend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_gpa: Option<f64>,
}

/// Un-rounded Σ(grade point × credit).
pub fn total_points<T: GradedCredit>(results: &[T]) -> f64 {
    results
        .iter()
        .map(|r| r.grade_point() * r.credit() as f64)
        .sum()
}

/// Σ credit, saturating at `i64::MAX` instead of overflowing.
pub fn total_credits<T: GradedCredit>(results: &[T]) -> i64 {
    results
        .iter()
        .fold(0i64, |acc, r| acc.saturating_add(r.credit()))
}

fn weighted_average<T: GradedCredit>(results: &[T]) -> f64 {
    // summed as f64 so the divisor stays in step with total_points
    let credits: f64 = results.iter().map(|r| r.credit() as f64).sum();
    if credits <= 0.0 {
        // no credits means no GPA yet, reported as zero
        return 0.0;
    }
    round2(total_points(results) / credits)
}

/// Credit-weighted average over every result. Zero when there are no credits.
pub fn cumulative_gpa<T: GradedCredit>(results: &[T]) -> f64 {
    weighted_average(results)
}

/// Same formula as [`cumulative_gpa`], applied to a single semester's results.
pub fn semester_gpa<T: GradedCredit>(results_in_semester: &[T]) -> f64 {
    weighted_average(results_in_semester)
}

/// Partitions results by semester token, keeping each group's input order.
pub fn group_by_semester<T: GradedCredit>(results: &[T]) -> BTreeMap<String, Vec<&T>> {
    let mut groups: BTreeMap<String, Vec<&T>> = BTreeMap::new();
    for result in results {
        let semester = match result.semester().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => UNKNOWN_SEMESTER.to_string(),
        };
        groups.entry(semester).or_default().push(result);
    }
    groups
}

/// Per-semester GPA with a trend against the previous semester.
///
/// Semesters are ordered by plain string comparison, which matches
/// chronology only for single-digit `Y{n}S{n}` tokens. The `Unknown` bucket
/// has no place in that order: it is appended last, marked `Same`, and is
/// never compared against a neighbour.
pub fn semester_trend_series<T: GradedCredit>(results: &[T]) -> Vec<SemesterGpa> {
    let mut groups = group_by_semester(results);
    let unknown = groups.remove(UNKNOWN_SEMESTER);

    // BTreeMap iteration is already lexicographic on the token
    let mut series: Vec<SemesterGpa> = Vec::with_capacity(groups.len() + 1);
    for (semester, group) in groups {
        let gpa = semester_gpa(&group);
        let prev_gpa = series.last().map(|p| p.gpa);
        let trend = match prev_gpa {
            Some(prev) if gpa > prev => Trend::Up,
            Some(prev) if gpa < prev => Trend::Down,
            _ => Trend::Same,
        };
        series.push(SemesterGpa {
            semester,
            gpa,
            trend,
            prev_gpa,
        });
    }

    if let Some(group) = unknown {
        series.push(SemesterGpa {
            semester: UNKNOWN_SEMESTER.to_string(),
            gpa: semester_gpa(&group),
            trend: Trend::Same,
            prev_gpa: None,
        });
    }
    series
}
