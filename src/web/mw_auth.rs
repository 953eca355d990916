// src/web/mw_auth.rs
use crate::{
    error::{AppError, AppResult},
    models::user::CurrentUser,
    services::user_service,
    state::AppState,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Session key holding the logged-in user's id.
pub const SESSION_USER_KEY: &str = "user_id";

/// Resolves the session to a user, if any.
///
/// A session pointing at a deleted user is flushed and treated as anonymous.
pub async fn current_user(state: &AppState, session: &Session) -> AppResult<Option<CurrentUser>> {
    let user_id = session
        .get::<i64>(SESSION_USER_KEY)
        .await
        .map_err(|e| AppError::SessionError(format!("failed to read session: {e}")))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    match user_service::find_user_by_id(&state.db_pool, user_id).await? {
        Some(user) => Ok(Some(CurrentUser::from(&user))),
        None => {
            tracing::warn!("Session refers to missing user {}, flushing it.", user_id);
            session
                .flush()
                .await
                .map_err(|e| AppError::SessionError(format!("failed to flush session: {e}")))?;
            Ok(None)
        }
    }
}

/// API guard: anonymous requests get a JSON 401.
pub async fn require_api_auth(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match current_user(&state, &session).await? {
        Some(user) => {
            tracing::debug!("API auth: user {} authenticated.", user.id);
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        None => Err(AppError::Unauthorized),
    }
}

/// Page guard: anonymous visitors are sent to the login form.
pub async fn require_page_auth(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match current_user(&state, &session).await? {
        Some(user) => {
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        None => {
            tracing::debug!("Page auth: not logged in, redirecting to /login");
            Ok(Redirect::to("/login").into_response())
        }
    }
}
