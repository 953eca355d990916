// src/services/attendance_service.rs
use crate::{
    error::{AppError, AppResult},
    models::attendance::{AttendanceRecord, AttendanceStatus},
    services::course_service,
};
use chrono::NaiveDate;
use sqlx::SqlitePool;

const SELECT_ATTENDANCE: &str = r#"
    SELECT a.id, a.student_id, u.name AS student_name, a.course_id,
           a.attendance_date, a.status
    FROM attendance a
    JOIN users u ON u.id = a.student_id
"#;

/// Attendance of one course, newest day first.
pub async fn list_for_course(db_pool: &SqlitePool, course_id: i64) -> AppResult<Vec<AttendanceRecord>> {
    let records = sqlx::query_as::<_, AttendanceRecord>(&format!(
        "{SELECT_ATTENDANCE} WHERE a.course_id = ?1 ORDER BY a.attendance_date DESC, a.id DESC"
    ))
    .bind(course_id)
    .fetch_all(db_pool)
    .await?;
    Ok(records)
}

async fn find_record(db_pool: &SqlitePool, attendance_id: i64) -> AppResult<AttendanceRecord> {
    sqlx::query_as::<_, AttendanceRecord>(&format!("{SELECT_ATTENDANCE} WHERE a.id = ?1"))
        .bind(attendance_id)
        .fetch_optional(db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Attendance {attendance_id} not found")))
}

pub async fn record_attendance(
    db_pool: &SqlitePool,
    student_id: i64,
    course_id: i64,
    attendance_date: NaiveDate,
    status: AttendanceStatus,
) -> AppResult<AttendanceRecord> {
    course_service::require_course(db_pool, course_id).await?;

    let inserted = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO attendance (student_id, course_id, attendance_date, status)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id
        "#,
    )
    .bind(student_id)
    .bind(course_id)
    .bind(attendance_date)
    .bind(status.as_str())
    .fetch_one(db_pool)
    .await;

    let id = match inserted {
        Ok(id) => id,
        // the only foreign key left unchecked is the student
        Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
            return Err(AppError::NotFound(format!("Student {student_id} not found")));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("Attendance {} recorded ({}) for student {}", id, status.as_str(), student_id);
    find_record(db_pool, id).await
}

pub async fn update_status(
    db_pool: &SqlitePool,
    attendance_id: i64,
    status: AttendanceStatus,
) -> AppResult<AttendanceRecord> {
    let rows_affected = sqlx::query("UPDATE attendance SET status = ?1 WHERE id = ?2")
        .bind(status.as_str())
        .bind(attendance_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        return Err(AppError::NotFound(format!("Attendance {attendance_id} not found")));
    }
    tracing::info!("Attendance {} set to {}", attendance_id, status.as_str());
    find_record(db_pool, attendance_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::test_pool, models::user::Role, services::user_service};

    #[tokio::test]
    async fn record_list_and_update() {
        let pool = test_pool().await;
        let staff = user_service::create_user(&pool, "Alice", "alice@uni.edu", "secret123", Role::Staff, 4)
            .await
            .unwrap();
        let student = user_service::create_user(&pool, "Bob", "bob@uni.edu", "secret123", Role::Student, 4)
            .await
            .unwrap();
        let course = course_service::create_course(&pool, "Web Development", "WD101", staff.id)
            .await
            .unwrap();

        let day = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        record_attendance(&pool, student.id, course.id, day(1), AttendanceStatus::Present)
            .await
            .unwrap();
        let late = record_attendance(&pool, student.id, course.id, day(2), AttendanceStatus::Late)
            .await
            .unwrap();
        assert_eq!(late.student_name, "Bob");

        let listed = list_for_course(&pool, course.id).await.unwrap();
        // newest first
        assert_eq!(listed[0].attendance_date, day(2));
        assert_eq!(listed[1].attendance_date, day(1));

        let updated = update_status(&pool, late.id, AttendanceStatus::Absent).await.unwrap();
        assert_eq!(updated.status, "absent");

        assert!(matches!(
            update_status(&pool, late.id + 100, AttendanceStatus::Absent).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            record_attendance(&pool, 999, course.id, day(3), AttendanceStatus::Present).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            record_attendance(&pool, student.id, 999, day(3), AttendanceStatus::Present).await,
            Err(AppError::NotFound(_))
        ));
    }
}
