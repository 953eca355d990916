// src/services/mod.rs
pub mod attendance_service;
pub mod auth_service;
pub mod chat_service;
pub mod course_service;
pub mod market_service;
pub mod result_service;
pub mod review_service;
pub mod seed_service;
pub mod user_service;
