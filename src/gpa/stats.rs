// src/gpa/stats.rs
//! Course-level grade statistics shown on the staff dashboard.
use super::grade::Grade;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeCount {
    pub grade: Grade,
    pub count: u64,
}

/// Counts results per grade letter, ordered by letter.
pub fn grade_distribution<I>(grades: I) -> Vec<GradeCount>
where
    I: IntoIterator<Item = Grade>,
{
    let mut counts: BTreeMap<&'static str, (Grade, u64)> = BTreeMap::new();
    for grade in grades {
        counts.entry(grade.as_str()).or_insert((grade, 0)).1 += 1;
    }
    counts
        .into_values()
        .map(|(grade, count)| GradeCount { grade, count })
        .collect()
}

/// Share of passing results as a percentage with one decimal.
/// `None` when the course has no results yet.
pub fn pass_rate(distribution: &[GradeCount]) -> Option<f64> {
    let total: u64 = distribution.iter().map(|c| c.count).sum();
    if total == 0 {
        return None;
    }
    let passed: u64 = distribution
        .iter()
        .filter(|c| c.grade.is_pass())
        .map(|c| c.count)
        .sum();
    Some((passed as f64 / total as f64 * 1000.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_is_sorted_by_letter() {
        let dist = grade_distribution([Grade::BPlus, Grade::A, Grade::BPlus, Grade::F]);
        let letters: Vec<(&str, u64)> = dist.iter().map(|c| (c.grade.as_str(), c.count)).collect();
        assert_eq!(letters, [("A", 1), ("B+", 2), ("F", 1)]);
    }

    #[test]
    fn pass_rate_counts_everything_but_f() {
        let dist = grade_distribution([Grade::A, Grade::C, Grade::F]);
        assert_eq!(pass_rate(&dist), Some(66.7));
        assert_eq!(pass_rate(&[]), None);
    }
}
