// handlers/blogs/blogs_post.rs - POST /blogs handler

use axum::extract::State;

use crate::database::{Blog, BlogInput};
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

/// POST /blogs - Create a blog post
///
/// Expected Input:
/// ```json
/// {
///   "title": "string",
///   "content": "string",
///   "author": "string",
///   "timestamp": "2024-05-01T10:00:00Z"   // optional, defaults to now
/// }
/// ```
///
/// Returns 201 with the stored row, including its assigned `id`.
pub async fn blogs_post(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<BlogInput>,
) -> ApiResult<Blog> {
    let blog = state.blogs.create_blog(input).await?;
    tracing::info!("Created blog post {}", blog.id);
    Ok(ApiResponse::created(blog))
}
