// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{CurrentUser, LoginForm, RegisterForm, Role},
    services::{auth_service, user_service},
    state::AppState,
    templates::{LoginPage, RegisterPage},
    web::mw_auth::{self, SESSION_USER_KEY},
};
use askama::Template;
use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

#[derive(Debug, Deserialize)]
pub struct LoginParams {
    registered: Option<String>,
}

fn render_page<T: Template>(status: StatusCode, page: T) -> AppResult<Response> {
    match page.render() {
        Ok(html) => Ok((status, Html(html)).into_response()),
        Err(e) => {
            tracing::error!("Failed to render template: {}", e);
            Err(AppError::InternalServerError)
        }
    }
}

// GET /login
pub async fn show_login_form(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<LoginParams>,
) -> AppResult<Response> {
    if let Some(user) = mw_auth::current_user(&state, &session).await? {
        tracing::debug!("GET /login: user {} already logged in", user.id);
        return Ok(Redirect::to(user.home_path()).into_response());
    }

    let notice = params
        .registered
        .map(|_| "Registration successful, please log in.".to_string());
    render_page(
        StatusCode::OK,
        LoginPage {
            error: None,
            notice,
            email: String::new(),
        },
    )
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for {}", form.email);

    if form.email.trim().is_empty() || form.password.is_empty() {
        return render_page(
            StatusCode::BAD_REQUEST,
            LoginPage {
                error: Some("Missing fields".into()),
                notice: None,
                email: form.email,
            },
        );
    }

    match auth_service::authenticate(&state.db_pool, &form.email, &form.password).await {
        Ok(user) => {
            // fresh session id on privilege change
            session
                .cycle_id()
                .await
                .map_err(|e| AppError::SessionError(format!("failed to cycle id: {e}")))?;
            session
                .insert(SESSION_USER_KEY, user.id)
                .await
                .map_err(|e| AppError::SessionError(format!("failed to insert into session: {e}")))?;

            tracing::info!("✅ Login succeeded for user {}", user.id);
            Ok(Redirect::to(CurrentUser::from(&user).home_path()).into_response())
        }
        Err(AppError::InvalidCredentials) => render_page(
            StatusCode::UNAUTHORIZED,
            LoginPage {
                error: Some("Invalid email or password.".into()),
                notice: None,
                email: form.email,
            },
        ),
        Err(e) => Err(e),
    }
}

// GET /register
pub async fn show_register_form() -> AppResult<Response> {
    render_page(
        StatusCode::OK,
        RegisterPage {
            error: None,
            name: String::new(),
            email: String::new(),
        },
    )
}

// POST /register
pub async fn handle_register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let role: Role = match form.role.parse() {
        Ok(role) => role,
        Err(msg) => {
            tracing::warn!("Registration with bad role: {}", msg);
            return render_page(
                StatusCode::BAD_REQUEST,
                RegisterPage {
                    error: Some("Please choose student or staff.".into()),
                    name: form.name,
                    email: form.email,
                },
            );
        }
    };

    let created = user_service::create_user(
        &state.db_pool,
        &form.name,
        &form.email,
        &form.password,
        role,
        state.config.bcrypt_cost,
    )
    .await;

    match created {
        Ok(_) => Ok(Redirect::to("/login?registered=1").into_response()),
        Err(e @ (AppError::BadRequest(_) | AppError::Conflict(_))) => render_page(
            e.status(),
            RegisterPage {
                error: Some(e.public_message()),
                name: form.name,
                email: form.email,
            },
        ),
        Err(e) => Err(e),
    }
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    let user_id: Option<i64> = session.get(SESSION_USER_KEY).await.ok().flatten();

    session
        .delete()
        .await
        .map_err(|e| AppError::SessionError(format!("failed to delete session: {e}")))?;

    match user_id {
        Some(id) => tracing::info!("🚪 User {} logged out.", id),
        None => tracing::info!("🚪 Anonymous session closed."),
    }
    Ok(Redirect::to("/login"))
}
