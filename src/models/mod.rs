// src/models/mod.rs
pub mod attendance;
pub mod course;
pub mod result;
pub mod review;
pub mod user;
