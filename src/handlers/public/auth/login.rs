// handlers/public/auth/login.rs - POST /login handler

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}

/// POST /login - Authenticate and receive a bearer token
///
/// Expected Input:
/// ```json
/// { "email": "ada@example.com", "password": "secret" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "message": "Login successful", "token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// An unknown email and a wrong password both answer 400 `Invalid credentials`.
pub async fn login_post(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let Some(user) = state.users.find_by_email(&payload.email).await? else {
        tracing::warn!("Login failed, unknown email: {}", payload.email);
        return Err(ApiError::invalid_credentials());
    };

    if !state.auth.verify_password(&payload.password, &user.password).await? {
        tracing::warn!("Login failed, wrong password for: {}", payload.email);
        return Err(ApiError::invalid_credentials());
    }

    let token = state.auth.issue_token(user.id)?;

    tracing::info!("User {} logged in", user.id);
    Ok(ApiResponse::success(LoginResponse {
        message: "Login successful",
        token,
    }))
}
