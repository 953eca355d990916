// src/templates.rs
use askama::Template;
use crate::gpa::{Difficulty, SemesterGpa, TargetOutcome, Trend};
use crate::models::{course::Course, result::CourseGradeStats};

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub error: Option<String>,
    pub notice: Option<String>,
    pub email: String,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub error: Option<String>,
    pub name: String,
    pub email: String,
}

/// One row of the semester table, preformatted for display.
pub struct SemesterRow {
    pub semester: String,
    pub gpa: String,
    pub arrow: &'static str,
    pub change: String,
}

impl From<&SemesterGpa> for SemesterRow {
    fn from(point: &SemesterGpa) -> Self {
        let arrow = match point.trend {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Same => "–",
        };
        let change = match point.prev_gpa {
            Some(prev) => format!("{:+.2} compared to last semester", point.gpa - prev),
            None => String::new(),
        };
        Self {
            semester: point.semester.clone(),
            gpa: format!("{:.2}", point.gpa),
            arrow,
            change,
        }
    }
}

pub struct ResultRow {
    pub course: String,
    pub grade: String,
    pub credit: i64,
    pub semester: String,
}

#[derive(Template)]
#[template(path = "student_dashboard.html")]
pub struct StudentDashboardPage {
    pub name: String,
    pub cgpa: String,
    pub total_credits: i64,
    pub total_courses: usize,
    pub semesters: Vec<SemesterRow>,
    pub results: Vec<ResultRow>,
}

/// Planner outcome, preformatted.
pub struct TargetView {
    pub required_gpa: String,
    pub label: &'static str,
    pub advice: &'static str,
    pub achievable: bool,
    pub applicable: bool,
    pub increase_needed: String,
    pub remaining_credits: String,
}

impl From<&TargetOutcome> for TargetView {
    fn from(outcome: &TargetOutcome) -> Self {
        Self {
            required_gpa: format!("{:.2}", outcome.required_gpa),
            label: outcome.difficulty.label(),
            advice: outcome.difficulty.advice(),
            achievable: outcome.achievable,
            applicable: outcome.difficulty != Difficulty::NotApplicable,
            increase_needed: format!("{:.2}", outcome.cgpa_increase_needed),
            remaining_credits: format!("{}", outcome.remaining_credits),
        }
    }
}

#[derive(Template)]
#[template(path = "target_cgpa.html")]
pub struct TargetCgpaPage {
    pub current_cgpa: String,
    pub current_credits: i64,
    pub target_cgpa: f64,
    pub remaining_semesters: i64,
    pub avg_credits_per_semester: f64,
    pub error: Option<String>,
    pub outcome: Option<TargetView>,
}

pub struct CourseCard {
    pub code: String,
    pub name: String,
    pub total: u64,
    pub pass_rate: String,
    pub grades: Vec<(String, u64)>,
}

impl CourseCard {
    pub fn new(course: &Course, stats: &CourseGradeStats) -> Self {
        Self {
            code: course.course_code.clone(),
            name: course.course_name.clone(),
            total: stats.total,
            pass_rate: stats
                .pass_rate
                .map(|rate| format!("{rate:.1}%"))
                .unwrap_or_else(|| "-".to_string()),
            grades: stats
                .stats
                .iter()
                .map(|c| (c.grade.to_string(), c.count))
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "staff_dashboard.html")]
pub struct StaffDashboardPage {
    pub name: String,
    pub courses: Vec<CourseCard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semester_row_formats_change() {
        let row = SemesterRow::from(&SemesterGpa {
            semester: "Y1S2".into(),
            gpa: 3.5,
            trend: Trend::Up,
            prev_gpa: Some(3.25),
        });
        assert_eq!(row.gpa, "3.50");
        assert_eq!(row.arrow, "▲");
        assert_eq!(row.change, "+0.25 compared to last semester");
    }

    #[test]
    fn login_page_renders_error() {
        let html = LoginPage {
            error: Some("Invalid email or password.".into()),
            notice: None,
            email: "bob@student.edu".into(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Invalid email or password."));
        assert!(html.contains("bob@student.edu"));
    }
}
