use axum::{Extension, Json};

use crate::models::{MeResponse, User};

/// The auth middleware has already reloaded the user row; this just shapes
/// the response.
pub async fn current_user(Extension(user): Extension<User>) -> Json<MeResponse> {
    Json(MeResponse { user: user.into() })
}
