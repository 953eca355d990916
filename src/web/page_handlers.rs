// src/web/page_handlers.rs
use crate::{
    error::{AppError, AppResult},
    gpa::{self, TargetPlan},
    models::user::CurrentUser,
    services::{course_service, result_service},
    state::AppState,
    templates::{
        CourseCard, ResultRow, SemesterRow, StaffDashboardPage, StudentDashboardPage,
        TargetCgpaPage, TargetView,
    },
};
use askama::Template;
use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

fn render<T: Template>(page: T) -> AppResult<Html<String>> {
    page.render().map(Html).map_err(|e| {
        tracing::error!("Failed to render page: {}", e);
        AppError::InternalServerError
    })
}

// GET /
pub async fn home(Extension(user): Extension<CurrentUser>) -> Redirect {
    Redirect::to(user.home_path())
}

// GET /student
pub async fn student_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Html<String>> {
    tracing::debug!("GET /student for {}", user.id);
    let results = result_service::list_for_student(&state.db_pool, user.id).await?;

    let rows = results
        .iter()
        .map(|r| ResultRow {
            course: format!("{} {}", r.course_code, r.course_name),
            grade: r.grade.clone(),
            credit: r.credit,
            semester: r.semester.clone().unwrap_or_default(),
        })
        .collect();
    let summary = result_service::summarize(results);

    render(StudentDashboardPage {
        name: user.name,
        cgpa: format!("{:.2}", summary.cgpa),
        total_credits: summary.total_credits,
        total_courses: summary.total_courses,
        semesters: summary.trend.iter().map(SemesterRow::from).collect(),
        results: rows,
    })
}

#[derive(Debug, Deserialize)]
pub struct TargetParams {
    target_cgpa: Option<f64>,
    remaining_semesters: Option<i64>,
    avg_credits_per_semester: Option<f64>,
}

impl TargetParams {
    fn plan(&self) -> TargetPlan {
        TargetPlan {
            target_cgpa: self.target_cgpa.unwrap_or(3.8),
            remaining_semesters: self.remaining_semesters.unwrap_or(1),
            avg_credits_per_semester: self.avg_credits_per_semester.unwrap_or(10.0),
        }
    }
}

// GET /student/target-cgpa
pub async fn target_cgpa_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<TargetParams>,
) -> AppResult<Response> {
    let plan = params.plan();
    let results = result_service::list_for_student(&state.db_pool, user.id).await?;

    // a bad plan re-renders the form with the message
    let (outcome, error) = match result_service::check_plan(&plan) {
        Ok(()) => (Some(gpa::plan_target(&results, &plan)), None),
        Err(AppError::BadRequest(msg)) => {
            tracing::debug!("Target plan rejected for {}: {}", user.id, msg);
            (None, Some(msg))
        }
        Err(e) => return Err(e),
    };
    let status = if error.is_some() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };

    let page = render(TargetCgpaPage {
        current_cgpa: format!("{:.2}", gpa::cumulative_gpa(&results)),
        current_credits: gpa::total_credits(&results),
        target_cgpa: plan.target_cgpa,
        remaining_semesters: plan.remaining_semesters,
        avg_credits_per_semester: plan.avg_credits_per_semester,
        error,
        outcome: outcome.as_ref().map(TargetView::from),
    })?;
    Ok((status, page).into_response())
}

// GET /staff
pub async fn staff_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Html<String>> {
    let courses = course_service::list_courses(&state.db_pool, Some(user.id)).await?;

    let mut cards = Vec::with_capacity(courses.len());
    for course in &courses {
        let stats = result_service::course_grade_stats(&state.db_pool, course.id).await?;
        cards.push(CourseCard::new(course, &stats));
    }

    render(StaffDashboardPage {
        name: user.name,
        courses: cards,
    })
}
