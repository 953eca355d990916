// src/models/attendance.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            other => Err(format!("unknown attendance status '{other}'")),
        }
    }
}

/// Attendance row joined with the student's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub course_id: i64,
    pub attendance_date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub course_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct NewAttendanceRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub attendance_date: NaiveDate,
    #[serde(default = "default_status")]
    pub status: AttendanceStatus,
}

fn default_status() -> AttendanceStatus {
    AttendanceStatus::Present
}

#[derive(Debug, Deserialize)]
pub struct UpdateAttendanceRequest {
    pub attendance_id: i64,
    pub status: AttendanceStatus,
}
