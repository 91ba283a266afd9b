// handlers/blogs/blog_put.rs - PUT /blogs/:id handler

use axum::extract::State;

use crate::database::{Blog, BlogInput};
use crate::middleware::{ApiResponse, ApiResult, JsonBody, PathParam};
use crate::state::AppState;

/// PUT /blogs/:id - Overwrite a blog post
///
/// Takes the same body as POST /blogs. An omitted `timestamp` keeps the stored one.
/// Returns the updated row, or 404 `Blog post not found`.
pub async fn blog_put(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(input): JsonBody<BlogInput>,
) -> ApiResult<Blog> {
    let blog = state.blogs.update_blog(id, input).await?;
    tracing::info!("Updated blog post {}", blog.id);
    Ok(ApiResponse::success(blog))
}
