// handlers/auth/whoami.rs - GET /whoami handler

use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /whoami - Identity carried by the caller's bearer token
///
/// Expected Output:
/// ```json
/// { "userId": 1 }
/// ```
pub async fn whoami_get(user: AuthUser) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({ "userId": user.user_id })))
}
