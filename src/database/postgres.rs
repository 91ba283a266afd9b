use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::DatabaseError;
use super::models::{Blog, BlogInput, NewUser, User};
use super::store::{BlogStore, UserStore, BLOG_NOT_FOUND, EMAIL_EXISTS};

/// Postgres-backed implementation of both stores over a shared pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password
             FROM users
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> Result<(), DatabaseError> {
        let result = sqlx::query("INSERT INTO users (name, email, password) VALUES ($1, $2, $3)")
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            // Losing a concurrent signup race surfaces as a unique violation
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DatabaseError::Conflict(EMAIL_EXISTS.to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn create_blog(&self, input: BlogInput) -> Result<Blog, DatabaseError> {
        let blog = sqlx::query_as::<_, Blog>(
            "INSERT INTO blogs (title, content, author, timestamp)
             VALUES ($1, $2, $3, COALESCE($4, CURRENT_TIMESTAMP))
             RETURNING id, title, content, author, timestamp",
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.author)
        .bind(input.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(blog)
    }

    async fn list_blogs(&self) -> Result<Vec<Blog>, DatabaseError> {
        let blogs = sqlx::query_as::<_, Blog>(
            "SELECT id, title, content, author, timestamp
             FROM blogs
             ORDER BY timestamp DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(blogs)
    }

    async fn update_blog(&self, id: i32, input: BlogInput) -> Result<Blog, DatabaseError> {
        sqlx::query_as::<_, Blog>(
            "UPDATE blogs
             SET title = $1, content = $2, author = $3, timestamp = COALESCE($4, timestamp)
             WHERE id = $5
             RETURNING id, title, content, author, timestamp",
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.author)
        .bind(input.timestamp)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(BLOG_NOT_FOUND.to_string()))
    }

    async fn delete_blog(&self, id: i32) -> Result<Blog, DatabaseError> {
        sqlx::query_as::<_, Blog>(
            "DELETE FROM blogs
             WHERE id = $1
             RETURNING id, title, content, author, timestamp",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(BLOG_NOT_FOUND.to_string()))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
