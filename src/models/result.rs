// src/models/result.rs
use crate::gpa::{GradeCount, GradedCredit, SemesterGpa};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A result joined with its course, as shown to the student.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResultRecord {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub course_code: String,
    pub grade: String,
    pub grade_point: f64,
    pub credit: i64,
    pub semester: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl GradedCredit for ResultRecord {
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

/// Body of `POST /api/results`. A client-sent `grade_point` is ignored:
/// the server always derives it from `grade`.
#[derive(Debug, Deserialize)]
pub struct NewResultRequest {
    /// Only honoured for staff, who may record results on a student's behalf.
    pub student_id: Option<i64>,
    pub course_id: i64,
    pub grade: String,
    pub credit: i64,
    pub semester: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResultRequest {
    pub grade: String,
    pub credit: i64,
    pub semester: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SemesterGroup {
    pub semester: String,
    pub gpa: f64,
    pub credits: i64,
    pub results: Vec<ResultRecord>,
}

#[derive(Debug, Serialize)]
pub struct ResultSummary {
    pub cgpa: f64,
    pub total_credits: i64,
    pub total_courses: usize,
    pub semesters: Vec<SemesterGroup>,
    pub trend: Vec<SemesterGpa>,
}

#[derive(Debug, Deserialize)]
pub struct CourseStatsQuery {
    pub course_id: i64,
}

#[derive(Debug, Serialize)]
pub struct CourseGradeStats {
    pub course_id: i64,
    pub total: u64,
    pub stats: Vec<GradeCount>,
    pub pass_rate: Option<f64>,
}
