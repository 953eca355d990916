// src/services/seed_service.rs
use crate::{
    error::AppResult,
    models::{attendance::AttendanceStatus, user::Role},
    services::{attendance_service, course_service, user_service},
};
use chrono::Utc;
use sqlx::SqlitePool;

/// Inserts a small demo data set into an empty database.
///
/// Returns `false` without touching anything if users already exist.
pub async fn seed_demo_data(db_pool: &SqlitePool, bcrypt_cost: u32) -> AppResult<bool> {
    if user_service::count_users(db_pool).await? > 0 {
        tracing::info!("Database already has users, skipping demo seed.");
        return Ok(false);
    }

    let staff = user_service::create_user(
        db_pool,
        "Alice Lecturer",
        "alice@university.edu",
        "password123",
        Role::Staff,
        bcrypt_cost,
    )
    .await?;
    let student = user_service::create_user(
        db_pool,
        "Bob Student",
        "bob@student.edu",
        "password123",
        Role::Student,
        bcrypt_cost,
    )
    .await?;

    let course = course_service::create_course(db_pool, "Web Development", "WD101", staff.id).await?;
    course_service::enroll(db_pool, student.id, course.id).await?;
    attendance_service::record_attendance(
        db_pool,
        student.id,
        course.id,
        Utc::now().date_naive(),
        AttendanceStatus::Present,
    )
    .await?;

    tracing::info!("🌱 Demo data inserted (staff {}, student {}).", staff.email, student.email);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::test_pool, services::auth_service};

    #[tokio::test]
    async fn seeds_an_empty_database_once() {
        let pool = test_pool().await;
        assert!(seed_demo_data(&pool, 4).await.unwrap());
        assert!(!seed_demo_data(&pool, 4).await.unwrap());
        assert_eq!(user_service::count_users(&pool).await.unwrap(), 2);

        let bob = auth_service::authenticate(&pool, "bob@student.edu", "password123")
            .await
            .unwrap();
        assert_eq!(bob.role(), Role::Student);

        let courses = course_service::list_courses(&pool, None).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].course_code, "WD101");

        let attendance = attendance_service::list_for_course(&pool, courses[0].id).await.unwrap();
        assert_eq!(attendance.len(), 1);
        assert_eq!(attendance[0].student_name, "Bob Student");
        assert_eq!(attendance[0].status, "present");
    }
}
