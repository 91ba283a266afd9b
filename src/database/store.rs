use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{Blog, BlogInput, NewUser, User};

/// Persistence for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Insert a new account. A duplicate email yields `DatabaseError::Conflict`.
    async fn insert_user(&self, user: NewUser) -> Result<(), DatabaseError>;
}

/// Persistence for blog posts.
#[async_trait]
pub trait BlogStore: Send + Sync {
    async fn create_blog(&self, input: BlogInput) -> Result<Blog, DatabaseError>;

    /// All posts, newest timestamp first.
    async fn list_blogs(&self) -> Result<Vec<Blog>, DatabaseError>;

    /// Overwrite the post with `id`. Missing rows yield `DatabaseError::NotFound`.
    async fn update_blog(&self, id: i32, input: BlogInput) -> Result<Blog, DatabaseError>;

    /// Remove the post with `id`, returning the deleted row.
    async fn delete_blog(&self, id: i32) -> Result<Blog, DatabaseError>;

    /// Round-trip to the backend, used by the health check.
    async fn ping(&self) -> Result<(), DatabaseError>;
}

pub(crate) const BLOG_NOT_FOUND: &str = "Blog post not found";
pub(crate) const EMAIL_EXISTS: &str = "Email already exists";
