// src/services/review_service.rs
use crate::{
    error::{AppError, AppResult},
    gpa::insight::{self, ReviewScores, StudySummary},
    models::review::{ReviewWithInsight, SaveReviewRequest, SemesterReview},
};
use sqlx::SqlitePool;

const REVIEW_COLUMNS: &str =
    "id, student_id, semester, gpa, time_management, difficulty, engagement, notes, updated_at";

fn validate(request: &SaveReviewRequest) -> AppResult<()> {
    if request.semester.trim().is_empty() {
        return Err(AppError::BadRequest("Semester is required".into()));
    }
    if !(0.0..=4.0).contains(&request.gpa) {
        return Err(AppError::BadRequest("GPA must be between 0.00 and 4.00".into()));
    }
    let ratings = [request.time_management, request.difficulty, request.engagement];
    if ratings.iter().any(|r| !(1..=5).contains(r)) {
        return Err(AppError::BadRequest("Ratings must be between 1 and 5".into()));
    }
    Ok(())
}

fn with_insight(review: SemesterReview) -> ReviewWithInsight {
    let insight = insight::review_insight(&review.scores());
    ReviewWithInsight { review, insight }
}

pub async fn list_reviews(db_pool: &SqlitePool, student_id: i64) -> AppResult<Vec<ReviewWithInsight>> {
    let reviews = sqlx::query_as::<_, SemesterReview>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM semester_reviews WHERE student_id = ?1 ORDER BY semester ASC"
    ))
    .bind(student_id)
    .fetch_all(db_pool)
    .await?;
    Ok(reviews.into_iter().map(with_insight).collect())
}

/// Creates or replaces the review of one semester.
pub async fn save_review(
    db_pool: &SqlitePool,
    student_id: i64,
    request: &SaveReviewRequest,
) -> AppResult<ReviewWithInsight> {
    validate(request)?;

    let review = sqlx::query_as::<_, SemesterReview>(&format!(
        r#"
        INSERT INTO semester_reviews
            (student_id, semester, gpa, time_management, difficulty, engagement, notes)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ON CONFLICT(student_id, semester) DO UPDATE SET
            gpa = excluded.gpa,
            time_management = excluded.time_management,
            difficulty = excluded.difficulty,
            engagement = excluded.engagement,
            notes = excluded.notes,
            updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')
        RETURNING {REVIEW_COLUMNS}
        "#
    ))
    .bind(student_id)
    .bind(request.semester.trim())
    .bind(request.gpa)
    .bind(request.time_management)
    .bind(request.difficulty)
    .bind(request.engagement)
    .bind(request.notes.trim())
    .fetch_one(db_pool)
    .await?;

    tracing::debug!("Review for {} saved by student {}", review.semester, student_id);
    Ok(with_insight(review))
}

pub async fn delete_review(db_pool: &SqlitePool, student_id: i64, semester: &str) -> AppResult<()> {
    let rows_affected = sqlx::query("DELETE FROM semester_reviews WHERE student_id = ?1 AND semester = ?2")
        .bind(student_id)
        .bind(semester)
        .execute(db_pool)
        .await?
        .rows_affected();
    if rows_affected == 0 {
        return Err(AppError::NotFound(format!("No review for {semester}")));
    }
    Ok(())
}

pub async fn summary(db_pool: &SqlitePool, student_id: i64) -> AppResult<StudySummary> {
    let reviews = list_reviews(db_pool, student_id).await?;
    let scores: Vec<ReviewScores> = reviews.iter().map(|r| r.review.scores()).collect();
    Ok(insight::study_summary(&scores))
}
