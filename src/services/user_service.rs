// src/services/user_service.rs
use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::user::{Role, User},
    services::auth_service,
};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at";

pub async fn find_user_by_id(db_pool: &SqlitePool, user_id: i64) -> AppResult<Option<User>> {
    tracing::debug!("Looking up user by id: {}", user_id);
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))
        .bind(user_id)
        .fetch_optional(db_pool)
        .await?;
    Ok(user)
}

pub async fn find_user_by_email(db_pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    tracing::debug!("Looking up user by email: {}", email);
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
    ))
    .bind(email.trim())
    .fetch_optional(db_pool)
    .await?;
    Ok(user)
}

pub async fn count_users(db_pool: &SqlitePool) -> AppResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db_pool)
        .await?;
    Ok(count)
}

fn validate_identity(name: &str, email: &str) -> AppResult<()> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(AppError::BadRequest("Missing required fields".into()));
    }
    let email = email.trim();
    // light check only; real verification would need a mail round trip
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::BadRequest("Invalid email address".into())),
    }
}

/// Registers a new user; the email must not be taken.
pub async fn create_user(
    db_pool: &SqlitePool,
    name: &str,
    email: &str,
    raw_password: &str,
    role: Role,
    bcrypt_cost: u32,
) -> AppResult<User> {
    validate_identity(name, email)?;
    auth_service::validate_new_password(raw_password)?;
    tracing::info!("Creating {} account for {}", role, email);

    let password_hash = auth_service::hash_password(raw_password, bcrypt_cost).await?;

    let inserted = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email, password_hash, role) VALUES (?1, ?2, ?3, ?4) RETURNING {USER_COLUMNS}"
    ))
    .bind(name.trim())
    .bind(email.trim())
    .bind(&password_hash)
    .bind(role.as_str())
    .fetch_one(db_pool)
    .await;

    match inserted {
        Ok(user) => {
            tracing::info!("✅ User {} created (id {}).", user.email, user.id);
            Ok(user)
        }
        Err(e) if is_unique_violation(&e) => {
            tracing::warn!("Registration refused: email '{}' already exists.", email);
            Err(AppError::Conflict("Email already exists".into()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Updates name and email; the email must not belong to someone else.
pub async fn update_profile(
    db_pool: &SqlitePool,
    user_id: i64,
    name: &str,
    email: &str,
) -> AppResult<User> {
    validate_identity(name, email)?;

    let updated = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET name = ?1, email = ?2 WHERE id = ?3 RETURNING {USER_COLUMNS}"
    ))
    .bind(name.trim())
    .bind(email.trim())
    .bind(user_id)
    .fetch_optional(db_pool)
    .await;

    match updated {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(AppError::NotFound("User not found".into())),
        Err(e) if is_unique_violation(&e) => Err(AppError::Conflict("Email already in use".into())),
        Err(e) => Err(e.into()),
    }
}

pub async fn update_password_hash(db_pool: &SqlitePool, user_id: i64, new_hash: &str) -> AppResult<()> {
    let rows_affected = sqlx::query("UPDATE users SET password_hash = ?1 WHERE id = ?2")
        .bind(new_hash)
        .bind(user_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Password change failed: user {} not found.", user_id);
        return Err(AppError::NotFound("User not found".into()));
    }
    tracing::info!("✅ Password changed for user {}", user_id);
    Ok(())
}
