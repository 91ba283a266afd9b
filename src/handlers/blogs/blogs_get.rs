// handlers/blogs/blogs_get.rs - GET /blogs handler

use axum::extract::State;

use crate::database::Blog;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /blogs - All blog posts, newest first
pub async fn blogs_get(State(state): State<AppState>) -> ApiResult<Vec<Blog>> {
    let blogs = state.blogs.list_blogs().await?;
    Ok(ApiResponse::success(blogs))
}
