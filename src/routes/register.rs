use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    error::{AppError, FieldError, Result},
    models::{AuthResponse, RegisterRequest},
    queries::user_queries,
    utils::jwt,
};

pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    validate_registration(&payload)?;

    if user_queries::find_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

    let user = user_queries::create_user(
        &state.db,
        &payload.email,
        &password_hash,
        &payload.first_name,
        &payload.last_name,
        payload.phone.as_deref(),
    )
    .await?;

    let token = jwt::generate_token(user.id)?;

    tracing::info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: user.into(),
        }),
    ))
}

fn validate_registration(payload: &RegisterRequest) -> Result<()> {
    let mut errors = Vec::new();

    if payload.email.is_empty() || !payload.email.contains('@') {
        errors.push(FieldError::new("email", "Invalid email address"));
    }

    if payload.password.len() < 6 {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }

    if payload.first_name.trim().is_empty() {
        errors.push(FieldError::new("firstName", "First name is required"));
    }

    if payload.last_name.trim().is_empty() {
        errors.push(FieldError::new("lastName", "Last name is required"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> RegisterRequest {
        RegisterRequest {
            email: "amal@example.com".to_string(),
            password: "secret99".to_string(),
            first_name: "Amal".to_string(),
            last_name: "Tarabay".to_string(),
            phone: None,
        }
    }

    #[test]
    fn accepts_valid_registration() {
        assert!(validate_registration(&valid_payload()).is_ok());
    }

    #[test]
    fn rejects_malformed_email_and_short_password() {
        let payload = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "abc".to_string(),
            ..valid_payload()
        };

        match validate_registration(&payload) {
            Err(AppError::Validation(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, ["email", "password"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_blank_names() {
        let payload = RegisterRequest {
            first_name: "  ".to_string(),
            last_name: String::new(),
            ..valid_payload()
        };

        match validate_registration(&payload) {
            Err(AppError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
