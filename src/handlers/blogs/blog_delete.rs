// handlers/blogs/blog_delete.rs - DELETE /blogs/:id handler

use axum::{extract::State, http::StatusCode};
use serde_json::Value;

use crate::middleware::{ApiResponse, ApiResult, PathParam};
use crate::state::AppState;

/// DELETE /blogs/:id - Remove a blog post
///
/// Answers with a confirmation message rather than the deleted row.
pub async fn blog_delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> ApiResult<Value> {
    let deleted = state.blogs.delete_blog(id).await?;
    tracing::info!("Deleted blog post {}", deleted.id);
    Ok(ApiResponse::message("Blog post deleted successfully", StatusCode::OK))
}
