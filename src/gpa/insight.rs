// src/gpa/insight.rs
//! Self-reflection helpers for semester reviews.
use super::round2;
use serde::Serialize;

/// The inputs of a semester review the insight rules look at.
/// Ratings are on a 1 to 5 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewScores {
    pub gpa: f64,
    pub time_management: i64,
    pub difficulty: i64,
    pub engagement: i64,
}

/// First matching rule wins.
pub fn review_insight(scores: &ReviewScores) -> &'static str {
    if scores.gpa < 3.0 && scores.time_management <= 2 {
        return "Low GPA may be related to poor time management.";
    }
    if scores.gpa >= 3.5 && scores.engagement >= 4 {
        return "High engagement correlates with strong academic performance.";
    }
    if scores.difficulty >= 4 && scores.gpa >= 3.5 {
        return "You perform well under challenging academic conditions.";
    }
    "Your academic performance is stable this semester."
}

/// Cross-semester reflection shown on the review summary view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudySummary {
    pub reviews: usize,
    pub average_gpa: f64,
    /// One decimal, like the rating it averages.
    pub average_time_management: f64,
    pub text: String,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Averages over all reviews plus a plain-language summary of them.
pub fn study_summary(reviews: &[ReviewScores]) -> StudySummary {
    if reviews.is_empty() {
        return StudySummary {
            reviews: 0,
            average_gpa: 0.0,
            average_time_management: 0.0,
            text: "No reviews available.".to_string(),
        };
    }
    let n = reviews.len() as f64;
    let average_gpa = round2(reviews.iter().map(|r| r.gpa).sum::<f64>() / n);
    let average_time_management =
        round1(reviews.iter().map(|r| r.time_management as f64).sum::<f64>() / n);

    let mut sentences = vec![
        format!("You have completed {} semester(s).", reviews.len()),
        format!("Your average GPA is {average_gpa:.2}."),
    ];
    if reviews.iter().any(|r| r.gpa < 3.0) {
        sentences.push("Some semesters had GPA below 3.0, consider reviewing time management.".into());
    }
    if reviews.iter().any(|r| r.gpa >= 3.5) {
        sentences.push("Several semesters were strong (GPA >= 3.5), well done!".into());
    }
    sentences.push(format!(
        "Your average time management rating is {average_time_management:.1}."
    ));
    if reviews.iter().any(|r| r.difficulty >= 4 && r.gpa >= 3.5) {
        sentences.push("You handled high difficulty semesters well, showing strong resilience.".into());
    }

    StudySummary {
        reviews: reviews.len(),
        average_gpa,
        average_time_management,
        text: sentences.join(" "),
    }
}
