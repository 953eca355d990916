// src/web/attendance_handlers.rs
use crate::{
    error::AppResult,
    models::{
        attendance::{AttendanceQuery, NewAttendanceRequest, UpdateAttendanceRequest},
        user::CurrentUser,
    },
    services::attendance_service,
    state::AppState,
};
use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

// GET /api/attendance?course_id=
pub async fn list_attendance(
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> AppResult<Json<Value>> {
    let attendance = attendance_service::list_for_course(&state.db_pool, query.course_id).await?;
    Ok(Json(json!({ "attendance": attendance })))
}

// POST /api/attendance (staff)
pub async fn record_attendance(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<NewAttendanceRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    user.require_staff()?;
    let attendance = attendance_service::record_attendance(
        &state.db_pool,
        body.student_id,
        body.course_id,
        body.attendance_date,
        body.status,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(json!({ "attendance": attendance }))))
}

// PATCH /api/attendance/update (staff)
pub async fn update_attendance(
    State(state): State<AppState>,
    Json(body): Json<UpdateAttendanceRequest>,
) -> AppResult<Json<Value>> {
    let attendance = attendance_service::update_status(&state.db_pool, body.attendance_id, body.status).await?;
    Ok(Json(json!({ "attendance": attendance })))
}
