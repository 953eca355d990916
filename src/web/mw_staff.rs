// src/web/mw_staff.rs
use crate::{error::AppError, models::user::CurrentUser};
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};

/// Lets only staff through. Must run after one of the auth guards.
pub async fn require_staff(
    Extension(user): Extension<CurrentUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    user.require_staff()?;
    tracing::debug!("Staff MW: access granted for {}", user.id);
    Ok(next.run(request).await)
}
