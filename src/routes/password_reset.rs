use axum::{Json, extract::State};
use chrono::{Duration, Utc};
use rand::{Rng, distr::Alphanumeric};

use crate::{
    AppState,
    error::{AppError, FieldError, Result},
    models::{ForgotPasswordRequest, ForgotPasswordResponse, MessageResponse, ResetPasswordRequest},
    queries::{password_reset_queries, user_queries},
};

const RESET_TOKEN_EXPIRY_MINUTES: i64 = 60;
const RESET_TOKEN_LEN: usize = 48;

// Identical response whether or not the email exists, so the endpoint
// cannot be used to probe for registered addresses.
const GENERIC_RESET_MESSAGE: &str =
    "If that email is registered, password reset instructions have been sent";

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<ForgotPasswordResponse>> {
    if payload.email.is_empty() || !payload.email.contains('@') {
        return Err(AppError::Validation(vec![FieldError::new(
            "email",
            "Invalid email address",
        )]));
    }

    let user = match user_queries::find_by_email(&state.db, &payload.email).await? {
        Some(user) => user,
        None => {
            return Ok(Json(ForgotPasswordResponse {
                message: GENERIC_RESET_MESSAGE.to_string(),
                token: None,
            }));
        }
    };

    password_reset_queries::delete_unused_for_user(&state.db, user.id).await?;

    let token = generate_reset_token();
    let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_EXPIRY_MINUTES);

    password_reset_queries::create_token(&state.db, user.id, &token, expires_at).await?;

    tracing::info!("Password reset token issued for user {}", user.id);

    // Demo deployment: the token is echoed in the response instead of being
    // delivered out of band.
    Ok(Json(ForgotPasswordResponse {
        message: GENERIC_RESET_MESSAGE.to_string(),
        token: Some(token),
    }))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    if payload.password.len() < 6 {
        return Err(AppError::Validation(vec![FieldError::new(
            "password",
            "Password must be at least 6 characters",
        )]));
    }

    let reset_token = password_reset_queries::find_valid(&state.db, &payload.token)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired reset token".to_string()))?;

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

    let consumed = password_reset_queries::consume_and_update_password(
        &state.db,
        reset_token.id,
        reset_token.user_id,
        &password_hash,
    )
    .await?;

    if !consumed {
        return Err(AppError::BadRequest(
            "Invalid or expired reset token".to_string(),
        ));
    }

    tracing::info!("Password reset completed for user {}", reset_token.user_id);

    Ok(Json(MessageResponse {
        message: "Password has been reset successfully".to_string(),
    }))
}

fn generate_reset_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RESET_TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_tokens_are_long_and_alphanumeric() {
        let token = generate_reset_token();

        assert_eq!(token.len(), RESET_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn reset_tokens_are_not_repeated() {
        assert_ne!(generate_reset_token(), generate_reset_token());
    }
}
