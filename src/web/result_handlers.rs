// src/web/result_handlers.rs
use crate::{
    error::AppResult,
    gpa::{self, TargetOutcome, TargetPlan},
    models::{
        result::{CourseGradeStats, CourseStatsQuery, NewResultRequest, ResultSummary, UpdateResultRequest},
        user::CurrentUser,
    },
    services::result_service,
    state::AppState,
};
use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

// GET /api/results
pub async fn list_results(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Value>> {
    let results = result_service::list_for_student(&state.db_pool, user.id).await?;
    Ok(Json(json!({ "results": results })))
}

// POST /api/results
pub async fn create_result(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<NewResultRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let result = result_service::create_result(&state.db_pool, &user, &body).await?;
    Ok((StatusCode::CREATED, Json(json!({ "result": result }))))
}

// PUT /api/results/{id}
pub async fn update_result(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(result_id): Path<i64>,
    Json(body): Json<UpdateResultRequest>,
) -> AppResult<Json<Value>> {
    let updated = result_service::update_result(&state.db_pool, &user, result_id, &body).await?;
    Ok(Json(json!({ "updated": updated })))
}

// DELETE /api/results/{id}
pub async fn delete_result(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(result_id): Path<i64>,
) -> AppResult<Json<Value>> {
    result_service::delete_result(&state.db_pool, &user, result_id).await?;
    Ok(Json(json!({ "message": "Deleted" })))
}

// GET /api/results/summary
pub async fn summary(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ResultSummary>> {
    let results = result_service::list_for_student(&state.db_pool, user.id).await?;
    Ok(Json(result_service::summarize(results)))
}

// GET /api/results/trend
pub async fn trend(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Value>> {
    let results = result_service::list_for_student(&state.db_pool, user.id).await?;
    Ok(Json(json!({ "semesters": gpa::semester_trend_series(&results) })))
}

// POST /api/results/target
pub async fn target(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(plan): Json<TargetPlan>,
) -> AppResult<Json<TargetOutcome>> {
    let outcome = result_service::plan_for_student(&state.db_pool, user.id, &plan).await?;
    Ok(Json(outcome))
}

// GET /api/results/stats?course_id= (staff)
pub async fn course_stats(
    State(state): State<AppState>,
    Query(query): Query<CourseStatsQuery>,
) -> AppResult<Json<CourseGradeStats>> {
    let stats = result_service::course_grade_stats(&state.db_pool, query.course_id).await?;
    Ok(Json(stats))
}
