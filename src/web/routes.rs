// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        attendance_handlers, auth_handlers, course_handlers, mw_auth, mw_staff, page_handlers,
        proxy_handlers, result_handlers, review_handlers, user_handlers,
    },
};
use axum::{
    middleware,
    response::Json,
    routing::{get, patch, post, put},
    Router,
};
use serde_json::{json, Value};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn create_router(app_state: AppState) -> Router {
    // --- Public routes ---
    let public_routes = Router::new()
        .route("/login", get(auth_handlers::show_login_form).post(auth_handlers::handle_login))
        .route("/register", get(auth_handlers::show_register_form).post(auth_handlers::handle_register))
        .route("/logout", get(auth_handlers::handle_logout));

    // --- HTML pages ---
    // mw_staff runs inside require_page_auth, which is applied below
    let staff_pages = Router::new()
        .route("/staff", get(page_handlers::staff_dashboard))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), mw_staff::require_staff));

    let page_routes = Router::new()
        .route("/", get(page_handlers::home))
        .route("/student", get(page_handlers::student_dashboard))
        .route("/student/target-cgpa", get(page_handlers::target_cgpa_page))
        .merge(staff_pages)
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_page_auth,
        ));

    // --- JSON API ---
    // Staff-only paths. POST /courses and POST /attendance share a path with
    // open methods, so their handlers check the role themselves.
    let staff_api = Router::new()
        .route("/courses/my", get(course_handlers::my_courses))
        .route("/results/stats", get(result_handlers::course_stats))
        .route("/attendance/update", patch(attendance_handlers::update_attendance))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), mw_staff::require_staff));

    let api_routes = Router::new()
        .route(
            "/user/profile",
            get(user_handlers::get_profile).put(user_handlers::update_profile),
        )
        .route("/user/change-password", put(user_handlers::change_password))
        .route("/user/stats", get(user_handlers::get_stats))
        .route(
            "/courses",
            get(course_handlers::list_courses).post(course_handlers::create_course),
        )
        .route("/courses/{id}/enroll", post(course_handlers::enroll))
        .route(
            "/results",
            get(result_handlers::list_results).post(result_handlers::create_result),
        )
        .route(
            "/results/{id}",
            put(result_handlers::update_result).delete(result_handlers::delete_result),
        )
        .route("/results/summary", get(result_handlers::summary))
        .route("/results/trend", get(result_handlers::trend))
        .route("/results/target", post(result_handlers::target))
        .route(
            "/attendance",
            get(attendance_handlers::list_attendance).post(attendance_handlers::record_attendance),
        )
        .route(
            "/reviews",
            get(review_handlers::list_reviews).put(review_handlers::save_review),
        )
        .route("/reviews/summary", get(review_handlers::summary))
        .route("/reviews/{semester}", axum::routing::delete(review_handlers::delete_review))
        .route("/chat", post(proxy_handlers::chat))
        .route("/marketstack", get(proxy_handlers::market_data))
        .merge(staff_api)
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_api_auth,
        ))
        // added after the auth layer, so it stays public
        .route("/health", get(health));

    // --- Final router ---
    Router::new()
        .merge(public_routes)
        .merge(page_routes)
        .nest("/api", api_routes)
        .with_state(app_state)
}
