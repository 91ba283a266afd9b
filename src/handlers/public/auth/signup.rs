// handlers/public/auth/signup.rs - POST /signup handler

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::database::store::EMAIL_EXISTS;
use crate::database::{DatabaseError, NewUser};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
}

/// POST /signup - Register a new account
///
/// Expected Input:
/// ```json
/// { "name": "Ada", "email": "ada@example.com", "password": "secret" }
/// ```
///
/// Responses:
/// - 201 `{ "message": "User created successfully" }`
/// - 400 `Email already exists` (also when a concurrent signup wins the race)
/// - 500 `Server Error`
pub async fn signup_post(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SignupRequest>,
) -> ApiResult<Value> {
    if state.users.find_by_email(&payload.email).await?.is_some() {
        tracing::warn!("Signup rejected, email already registered: {}", payload.email);
        return Err(ApiError::conflict(EMAIL_EXISTS));
    }

    let password_hash = state.auth.hash_password(&payload.password).await?;

    state
        .users
        .insert_user(NewUser {
            name: payload.name,
            email: payload.email.clone(),
            password_hash,
        })
        .await
        .inspect_err(|e| {
            if matches!(e, DatabaseError::Conflict(_)) {
                tracing::warn!("Signup lost a race on email: {}", payload.email);
            }
        })?;

    tracing::info!("User created: {}", payload.email);
    Ok(ApiResponse::message("User created successfully", StatusCode::CREATED))
}
