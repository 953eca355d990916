// src/models/review.rs
use crate::gpa::insight::ReviewScores;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SemesterReview {
    pub id: i64,
    pub student_id: i64,
    pub semester: String,
    pub gpa: f64,
    pub time_management: i64,
    pub difficulty: i64,
    pub engagement: i64,
    pub notes: String,
    pub updated_at: DateTime<Utc>,
}

impl SemesterReview {
    pub fn scores(&self) -> ReviewScores {
        ReviewScores {
            gpa: self.gpa,
            time_management: self.time_management,
            difficulty: self.difficulty,
            engagement: self.engagement,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewWithInsight {
    #[serde(flatten)]
    pub review: SemesterReview,
    pub insight: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SaveReviewRequest {
    pub semester: String,
    pub gpa: f64,
    pub time_management: i64,
    pub difficulty: i64,
    pub engagement: i64,
    #[serde(default)]
    pub notes: String,
}
