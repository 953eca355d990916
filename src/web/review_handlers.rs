// src/web/review_handlers.rs
use crate::{
    error::AppResult,
    models::{review::SaveReviewRequest, user::CurrentUser},
    services::review_service,
    state::AppState,
};
use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde_json::{json, Value};

// GET /api/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Value>> {
    let reviews = review_service::list_reviews(&state.db_pool, user.id).await?;
    Ok(Json(json!({ "reviews": reviews })))
}

// PUT /api/reviews
pub async fn save_review(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<SaveReviewRequest>,
) -> AppResult<Json<Value>> {
    let review = review_service::save_review(&state.db_pool, user.id, &body).await?;
    Ok(Json(json!({ "review": review })))
}

// DELETE /api/reviews/{semester}
pub async fn delete_review(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(semester): Path<String>,
) -> AppResult<Json<Value>> {
    review_service::delete_review(&state.db_pool, user.id, &semester).await?;
    Ok(Json(json!({ "message": "Deleted" })))
}

// GET /api/reviews/summary
pub async fn summary(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Value>> {
    let summary = review_service::summary(&state.db_pool, user.id).await?;
    Ok(Json(json!({ "summary": summary })))
}
