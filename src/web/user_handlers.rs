// src/web/user_handlers.rs
use crate::{
    error::{AppError, AppResult},
    gpa,
    models::user::{ChangePasswordRequest, CurrentUser, UpdateProfileRequest, UserProfile, UserStats},
    services::{auth_service, result_service, user_service},
    state::AppState,
};
use axum::{
    extract::{Extension, State},
    response::Json,
};
use serde_json::{json, Value};

// GET /api/user/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Value>> {
    let profile: UserProfile = user_service::find_user_by_id(&state.db_pool, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?
        .into();
    Ok(Json(json!({ "user": profile })))
}

// PUT /api/user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> AppResult<Json<Value>> {
    let updated = user_service::update_profile(&state.db_pool, user.id, &body.name, &body.email).await?;
    tracing::info!("Profile of user {} updated.", user.id);
    Ok(Json(json!({ "user": UserProfile::from(updated) })))
}

// PUT /api/user/change-password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<ChangePasswordRequest>,
) -> AppResult<Json<Value>> {
    auth_service::change_password(
        &state.db_pool,
        user.id,
        &body.current_password,
        &body.new_password,
        state.config.bcrypt_cost,
    )
    .await?;
    Ok(Json(json!({ "message": "Password updated successfully" })))
}

// GET /api/user/stats
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<UserStats>> {
    let results = result_service::list_for_student(&state.db_pool, user.id).await?;
    Ok(Json(UserStats {
        cgpa: gpa::cumulative_gpa(&results),
        credit_hours: gpa::total_credits(&results),
        total_courses: results.len(),
    }))
}
