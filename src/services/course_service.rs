// src/services/course_service.rs
use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::course::{Course, Enrollment},
};
use sqlx::SqlitePool;

/// All courses, or only those taught by `staff_id`.
pub async fn list_courses(db_pool: &SqlitePool, staff_id: Option<i64>) -> AppResult<Vec<Course>> {
    let courses = match staff_id {
        Some(staff_id) => {
            sqlx::query_as::<_, Course>(
                "SELECT id, course_name, course_code, staff_id FROM courses WHERE staff_id = ?1 ORDER BY course_code ASC",
            )
            .bind(staff_id)
            .fetch_all(db_pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Course>(
                "SELECT id, course_name, course_code, staff_id FROM courses ORDER BY course_code ASC",
            )
            .fetch_all(db_pool)
            .await?
        }
    };
    tracing::debug!("Found {} courses (staff filter: {:?}).", courses.len(), staff_id);
    Ok(courses)
}

pub async fn find_course(db_pool: &SqlitePool, course_id: i64) -> AppResult<Option<Course>> {
    let course = sqlx::query_as::<_, Course>(
        "SELECT id, course_name, course_code, staff_id FROM courses WHERE id = ?1",
    )
    .bind(course_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(course)
}

pub async fn require_course(db_pool: &SqlitePool, course_id: i64) -> AppResult<Course> {
    find_course(db_pool, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {course_id} not found")))
}

/// Creates a course owned by `staff_id`. Course codes are unique.
pub async fn create_course(
    db_pool: &SqlitePool,
    course_name: &str,
    course_code: &str,
    staff_id: i64,
) -> AppResult<Course> {
    let (course_name, course_code) = (course_name.trim(), course_code.trim());
    if course_name.is_empty() || course_code.is_empty() {
        return Err(AppError::BadRequest("Missing fields".into()));
    }
    tracing::info!("Staff {} creating course {}", staff_id, course_code);

    let inserted = sqlx::query_as::<_, Course>(
        r#"
        INSERT INTO courses (course_name, course_code, staff_id)
        VALUES (?1, ?2, ?3)
        RETURNING id, course_name, course_code, staff_id
        "#,
    )
    .bind(course_name)
    .bind(course_code)
    .bind(staff_id)
    .fetch_one(db_pool)
    .await;

    match inserted {
        Ok(course) => Ok(course),
        Err(e) if is_unique_violation(&e) => {
            tracing::warn!("Course code '{}' already exists.", course_code);
            Err(AppError::Conflict("Course code already exists".into()))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn enroll(db_pool: &SqlitePool, student_id: i64, course_id: i64) -> AppResult<Enrollment> {
    require_course(db_pool, course_id).await?;

    let inserted = sqlx::query_as::<_, Enrollment>(
        r#"
        INSERT INTO enrollments (student_id, course_id)
        VALUES (?1, ?2)
        RETURNING id, student_id, course_id, enrolled_at
        "#,
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_one(db_pool)
    .await;

    match inserted {
        Ok(enrollment) => {
            tracing::info!("Student {} enrolled in course {}", student_id, course_id);
            Ok(enrollment)
        }
        Err(e) if is_unique_violation(&e) => Err(AppError::Conflict("Already enrolled".into())),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::test_pool, models::user::Role, services::user_service};

    async fn staff_and_student(pool: &SqlitePool) -> (i64, i64) {
        let staff = user_service::create_user(pool, "Alice", "alice@uni.edu", "secret123", Role::Staff, 4)
            .await
            .unwrap();
        let student = user_service::create_user(pool, "Bob", "bob@uni.edu", "secret123", Role::Student, 4)
            .await
            .unwrap();
        (staff.id, student.id)
    }

    #[tokio::test]
    async fn course_codes_are_unique() {
        let pool = test_pool().await;
        let (staff, _) = staff_and_student(&pool).await;

        create_course(&pool, "Web Development", "WD101", staff).await.unwrap();
        let again = create_course(&pool, "Web Dev Again", "WD101", staff).await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
        assert!(matches!(
            create_course(&pool, " ", "X1", staff).await,
            Err(AppError::BadRequest(_))
        ));

        assert_eq!(list_courses(&pool, Some(staff)).await.unwrap().len(), 1);
        assert!(list_courses(&pool, Some(staff + 100)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn enrolling_twice_conflicts() {
        let pool = test_pool().await;
        let (staff, student) = staff_and_student(&pool).await;
        let course = create_course(&pool, "Web Development", "WD101", staff).await.unwrap();

        let enrollment = enroll(&pool, student, course.id).await.unwrap();
        assert_eq!(enrollment.course_id, course.id);
        assert!(matches!(
            enroll(&pool, student, course.id).await,
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            enroll(&pool, student, course.id + 1).await,
            Err(AppError::NotFound(_))
        ));
    }
}
