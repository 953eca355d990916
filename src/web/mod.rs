// src/web/mod.rs
pub mod attendance_handlers;
pub mod auth_handlers;
pub mod course_handlers;
pub mod mw_auth;
pub mod mw_staff;
pub mod page_handlers;
pub mod proxy_handlers;
pub mod result_handlers;
pub mod review_handlers;
pub mod routes;
pub mod user_handlers;
