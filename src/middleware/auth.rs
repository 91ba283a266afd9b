use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

pub const TOKEN_MISSING: &str = "Token not provided or invalid";
pub const TOKEN_REJECTED: &str = "Failed to authenticate token";

/// Authenticated caller, decoded from the bearer token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
}

/// Bearer token middleware.
///
/// - missing header or no `Bearer ` prefix: 403
/// - bad signature or expired token: 401
/// - otherwise the caller's `AuthUser` is attached to the request
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(request.headers()).ok_or_else(|| {
        tracing::warn!("Rejected request without a bearer token");
        ApiError::forbidden(TOKEN_MISSING)
    })?;

    let claims = state.auth.verify_token(token).map_err(|e| {
        tracing::warn!("Rejected bearer token: {}", e);
        ApiError::unauthorized(TOKEN_REJECTED)
    })?;

    request.extensions_mut().insert(AuthUser {
        user_id: claims.user_id,
    });

    Ok(next.run(request).await)
}

/// Only guard the request when writes require authentication
pub async fn require_auth_for_writes(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.require_auth_for_writes {
        require_auth(State(state), request, next).await
    } else {
        Ok(next.run(request).await)
    }
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().copied().ok_or_else(|| {
            tracing::error!("AuthUser requested on a route without the auth middleware");
            ApiError::forbidden(TOKEN_MISSING)
        })
    }
}
