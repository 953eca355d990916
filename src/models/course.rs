// src/models/course.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: i64,
    pub course_name: String,
    pub course_code: String,
    pub staff_id: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub course_name: String,
    pub course_code: String,
}

#[derive(Debug, Deserialize)]
pub struct CourseFilter {
    pub staff_id: Option<i64>,
}
