use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{error::Result, models::PasswordResetToken};

pub async fn create_token(
    pool: &PgPool,
    user_id: i32,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<PasswordResetToken> {
    let reset_token = sqlx::query_as::<_, PasswordResetToken>(
        "INSERT INTO password_reset_tokens (user_id, token, expires_at)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(user_id)
    .bind(token)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(reset_token)
}

/// Drops tokens the user never used; a fresh forgot-password request
/// supersedes them.
pub async fn delete_unused_for_user(pool: &PgPool, user_id: i32) -> Result<()> {
    sqlx::query("DELETE FROM password_reset_tokens WHERE user_id = $1 AND used_at IS NULL")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn find_valid(pool: &PgPool, token: &str) -> Result<Option<PasswordResetToken>> {
    let reset_token = sqlx::query_as::<_, PasswordResetToken>(
        "SELECT * FROM password_reset_tokens
         WHERE token = $1 AND expires_at > NOW() AND used_at IS NULL",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(reset_token)
}

/// Marks the token used and replaces the password hash in one transaction.
/// Returns false when the token was consumed concurrently, so the token is
/// single-use even under a race.
pub async fn consume_and_update_password(
    pool: &PgPool,
    token_id: i32,
    user_id: i32,
    password_hash: &str,
) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let consumed = sqlx::query(
        "UPDATE password_reset_tokens SET used_at = NOW()
         WHERE id = $1 AND used_at IS NULL",
    )
    .bind(token_id)
    .execute(&mut *tx)
    .await?;

    if consumed.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
        .bind(password_hash)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}
