// src/web/course_handlers.rs
use crate::{
    error::AppResult,
    models::{
        course::{CourseFilter, CreateCourseRequest},
        user::CurrentUser,
    },
    services::course_service,
    state::AppState,
};
use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

// GET /api/courses?staff_id=
pub async fn list_courses(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> AppResult<Json<Value>> {
    let courses = course_service::list_courses(&state.db_pool, filter.staff_id).await?;
    Ok(Json(json!({ "courses": courses })))
}

// GET /api/courses/my (staff)
pub async fn my_courses(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Value>> {
    let courses = course_service::list_courses(&state.db_pool, Some(user.id)).await?;
    Ok(Json(json!({ "courses": courses })))
}

// POST /api/courses (staff)
pub async fn create_course(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    user.require_staff()?;
    let course =
        course_service::create_course(&state.db_pool, &body.course_name, &body.course_code, user.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Course created", "course": course })),
    ))
}

// POST /api/courses/{id}/enroll
pub async fn enroll(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(course_id): Path<i64>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let enrollment = course_service::enroll(&state.db_pool, user.id, course_id).await?;
    Ok((StatusCode::CREATED, Json(json!({ "enrollment": enrollment }))))
}
