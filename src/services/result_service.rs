// src/services/result_service.rs
use crate::{
    error::{AppError, AppResult},
    gpa::{self, Grade, TargetOutcome, TargetPlan},
    models::{
        result::{
            CourseGradeStats, NewResultRequest, ResultRecord, ResultSummary, SemesterGroup,
            UpdateResultRequest,
        },
        user::{CurrentUser, Role},
    },
    services::{course_service, user_service},
};
use sqlx::SqlitePool;

const SELECT_RESULTS: &str = r#"
    SELECT r.id, r.student_id, r.course_id, c.course_name, c.course_code,
           r.grade, r.grade_point, r.credit, r.semester, r.created_at
    FROM results r
    JOIN courses c ON c.id = r.course_id
"#;

const MAX_SEMESTER_LEN: usize = 32;
/// Upper bound for the credit hours of a single course result.
pub const MAX_CREDIT: i64 = 30;

/// A result write after boundary validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidResult {
    pub grade: Grade,
    pub credit: i64,
    pub semester: Option<String>,
}

impl ValidResult {
    pub fn grade_point(&self) -> f64 {
        self.grade.point()
    }
}

/// Checks grade, credit and semester before anything reaches the database.
pub fn validate_result_input(grade: &str, credit: i64, semester: Option<&str>) -> AppResult<ValidResult> {
    let grade: Grade = grade.parse()?;
    if !(1..=MAX_CREDIT).contains(&credit) {
        return Err(AppError::BadRequest(format!(
            "Credit must be an integer between 1 and {MAX_CREDIT}"
        )));
    }
    let semester = semester.map(str::trim).filter(|s| !s.is_empty());
    if semester.is_some_and(|s| s.len() > MAX_SEMESTER_LEN) {
        return Err(AppError::BadRequest("Semester is too long".into()));
    }
    Ok(ValidResult {
        grade,
        credit,
        semester: semester.map(str::to_string),
    })
}

pub async fn list_for_student(db_pool: &SqlitePool, student_id: i64) -> AppResult<Vec<ResultRecord>> {
    let results = sqlx::query_as::<_, ResultRecord>(&format!(
        "{SELECT_RESULTS} WHERE r.student_id = ?1 ORDER BY r.created_at ASC, r.id ASC"
    ))
    .bind(student_id)
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Loaded {} results for student {}", results.len(), student_id);
    Ok(results)
}

pub async fn find_result(db_pool: &SqlitePool, result_id: i64) -> AppResult<Option<ResultRecord>> {
    let result = sqlx::query_as::<_, ResultRecord>(&format!("{SELECT_RESULTS} WHERE r.id = ?1"))
        .bind(result_id)
        .fetch_optional(db_pool)
        .await?;
    Ok(result)
}

/// Loads a result the actor is allowed to modify: their own, or any for staff.
async fn owned_result(db_pool: &SqlitePool, actor: &CurrentUser, result_id: i64) -> AppResult<ResultRecord> {
    let result = find_result(db_pool, result_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Result {result_id} not found")))?;
    if result.student_id != actor.id && !actor.is_staff() {
        tracing::warn!("User {} tried to touch result {} of student {}", actor.id, result_id, result.student_id);
        return Err(AppError::Forbidden);
    }
    Ok(result)
}

/// Works out whose result is being written.
async fn target_student(db_pool: &SqlitePool, actor: &CurrentUser, requested: Option<i64>) -> AppResult<i64> {
    match (actor.role, requested) {
        (Role::Student, None) => Ok(actor.id),
        (Role::Student, Some(id)) if id == actor.id => Ok(actor.id),
        (Role::Student, Some(_)) => Err(AppError::Forbidden),
        (Role::Staff, None) => Err(AppError::BadRequest("Missing student_id".into())),
        (Role::Staff, Some(id)) => {
            let student = user_service::find_user_by_id(db_pool, id)
                .await?
                .filter(|u| u.role() == Role::Student)
                .ok_or_else(|| AppError::NotFound(format!("Student {id} not found")))?;
            Ok(student.id)
        }
    }
}

pub async fn create_result(
    db_pool: &SqlitePool,
    actor: &CurrentUser,
    request: &NewResultRequest,
) -> AppResult<ResultRecord> {
    let valid = validate_result_input(&request.grade, request.credit, request.semester.as_deref())?;
    let student_id = target_student(db_pool, actor, request.student_id).await?;
    course_service::require_course(db_pool, request.course_id).await?;

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO results (student_id, course_id, grade, grade_point, credit, semester)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING id
        "#,
    )
    .bind(student_id)
    .bind(request.course_id)
    .bind(valid.grade.as_str())
    .bind(valid.grade_point())
    .bind(valid.credit)
    .bind(&valid.semester)
    .fetch_one(db_pool)
    .await?;

    tracing::info!("Result {} recorded for student {} by user {}", id, student_id, actor.id);
    find_result(db_pool, id)
        .await?
        .ok_or(AppError::InternalServerError)
}

pub async fn update_result(
    db_pool: &SqlitePool,
    actor: &CurrentUser,
    result_id: i64,
    request: &UpdateResultRequest,
) -> AppResult<ResultRecord> {
    let valid = validate_result_input(&request.grade, request.credit, request.semester.as_deref())?;
    owned_result(db_pool, actor, result_id).await?;

    sqlx::query(
        r#"
        UPDATE results
        SET grade = ?1, grade_point = ?2, credit = ?3, semester = ?4
        WHERE id = ?5
        "#,
    )
    .bind(valid.grade.as_str())
    .bind(valid.grade_point())
    .bind(valid.credit)
    .bind(&valid.semester)
    .bind(result_id)
    .execute(db_pool)
    .await?;

    tracing::info!("Result {} updated by user {}", result_id, actor.id);
    find_result(db_pool, result_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Result {result_id} not found")))
}

pub async fn delete_result(db_pool: &SqlitePool, actor: &CurrentUser, result_id: i64) -> AppResult<()> {
    owned_result(db_pool, actor, result_id).await?;
    sqlx::query("DELETE FROM results WHERE id = ?1")
        .bind(result_id)
        .execute(db_pool)
        .await?;
    tracing::info!("Result {} deleted by user {}", result_id, actor.id);
    Ok(())
}

/// Everything the CGPA page shows, derived from one student's results.
pub fn summarize(results: Vec<ResultRecord>) -> ResultSummary {
    let cgpa = gpa::cumulative_gpa(&results);
    let total_credits = gpa::total_credits(&results);
    let trend = gpa::semester_trend_series(&results);
    let total_courses = results.len();

    let semesters = gpa::group_by_semester(&results)
        .into_iter()
        .map(|(semester, group)| SemesterGroup {
            gpa: gpa::semester_gpa(&group),
            credits: gpa::total_credits(&group),
            results: group.into_iter().cloned().collect(),
            semester,
        })
        .collect();

    ResultSummary {
        cgpa,
        total_credits,
        total_courses,
        semesters,
        trend,
    }
}

/// Rejects planner input the engine cannot make sense of.
pub fn check_plan(plan: &TargetPlan) -> AppResult<()> {
    if !plan.target_cgpa.is_finite() || !(0.0..=gpa::planner::MAX_GRADE_POINT).contains(&plan.target_cgpa) {
        return Err(AppError::BadRequest("Target CGPA must be between 0.00 and 4.00".into()));
    }
    if !plan.avg_credits_per_semester.is_finite() {
        return Err(AppError::BadRequest("Average credits must be a number".into()));
    }
    Ok(())
}

/// Target planner over a student's stored results.
pub async fn plan_for_student(db_pool: &SqlitePool, student_id: i64, plan: &TargetPlan) -> AppResult<TargetOutcome> {
    check_plan(plan)?;
    let results = list_for_student(db_pool, student_id).await?;
    Ok(gpa::plan_target(&results, plan))
}

/// Grade distribution and pass rate for one course.
pub async fn course_grade_stats(db_pool: &SqlitePool, course_id: i64) -> AppResult<CourseGradeStats> {
    course_service::require_course(db_pool, course_id).await?;

    let letters: Vec<String> = sqlx::query_scalar("SELECT grade FROM results WHERE course_id = ?1")
        .bind(course_id)
        .fetch_all(db_pool)
        .await?;

    let grades = letters.iter().filter_map(|letter| match letter.parse::<Grade>() {
        Ok(grade) => Some(grade),
        Err(e) => {
            tracing::warn!("Skipping stored result with {} in course {}", e, course_id);
            None
        }
    });
    let stats = gpa::grade_distribution(grades);
    let total: u64 = stats.iter().map(|c| c.count).sum();

    Ok(CourseGradeStats {
        course_id,
        total,
        pass_rate: gpa::pass_rate(&stats),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_is_derived_from_grade() {
        let valid = validate_result_input("B+", 3, Some(" Y1S1 ")).unwrap();
        assert_eq!(valid.grade, Grade::BPlus);
        assert_eq!(valid.grade_point(), 3.33);
        assert_eq!(valid.semester.as_deref(), Some("Y1S1"));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            validate_result_input("E", 3, None),
            Err(AppError::InvalidGrade(_))
        ));
        assert!(matches!(
            validate_result_input("A", 0, None),
            Err(AppError::BadRequest(_))
        ));
        assert!(validate_result_input("A", -3, None).is_err());
        assert!(validate_result_input("A", 3, Some(&"Y".repeat(40))).is_err());
    }

    #[test]
    fn plan_bounds() {
        let plan = |target_cgpa| TargetPlan {
            target_cgpa,
            remaining_semesters: 1,
            avg_credits_per_semester: 10.0,
        };
        assert!(check_plan(&plan(3.8)).is_ok());
        assert!(check_plan(&plan(4.5)).is_err());
        assert!(check_plan(&plan(f64::NAN)).is_err());
    }

    #[test]
    fn credit_is_bounded() {
        assert!(validate_result_input("A", MAX_CREDIT, None).is_ok());
        assert!(matches!(
            validate_result_input("A", MAX_CREDIT + 1, None),
            Err(AppError::BadRequest(_))
        ));
        assert!(validate_result_input("A", i64::MAX, None).is_err());
    }

    #[test]
    fn blank_semester_becomes_none() {
        let valid = validate_result_input("A", 3, Some("   ")).unwrap();
        assert_eq!(valid.semester, None);
    }
}
