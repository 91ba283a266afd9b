use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, Request, StatusCode,
    },
    Router,
};
use chrono::{Duration, Utc};
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::auth::AuthService;
use crate::database::store::{BLOG_NOT_FOUND, EMAIL_EXISTS};
use crate::database::{Blog, BlogInput, BlogStore, DatabaseError, NewUser, User, UserStore};
use crate::state::AppState;

pub const TEST_SECRET: &str = "test-secret";

/// In-memory stand-in for Postgres with the same constraints:
/// unique emails, never-reused serial ids, newest-first listing.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    blogs: Mutex<Vec<Blog>>,
    next_user_id: Mutex<i32>,
    next_blog_id: Mutex<i32>,
    offline: AtomicBool,
}

impl MemoryStore {
    /// Make every subsequent call fail like an unreachable database
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), DatabaseError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError("connection refused".to_string()));
        }
        Ok(())
    }

    pub async fn user_id(&self, email: &str) -> Option<i32> {
        self.users.lock().await.iter().find(|u| u.email == email).map(|u| u.id)
    }

    pub async fn stored_password(&self, email: &str) -> Option<String> {
        self.users
            .lock()
            .await
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.password.clone())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        self.check_online()?;
        Ok(self.users.lock().await.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<(), DatabaseError> {
        self.check_online()?;
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict(EMAIL_EXISTS.to_string()));
        }
        let mut next_id = self.next_user_id.lock().await;
        *next_id += 1;
        users.push(User {
            id: *next_id,
            name: user.name,
            email: user.email,
            password: user.password_hash,
        });
        Ok(())
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn create_blog(&self, input: BlogInput) -> Result<Blog, DatabaseError> {
        self.check_online()?;
        let mut next_id = self.next_blog_id.lock().await;
        *next_id += 1;
        let blog = Blog {
            id: *next_id,
            title: input.title,
            content: input.content,
            author: input.author,
            timestamp: input.timestamp.unwrap_or_else(|| Utc::now().naive_utc()),
        };
        self.blogs.lock().await.push(blog.clone());
        Ok(blog)
    }

    async fn list_blogs(&self) -> Result<Vec<Blog>, DatabaseError> {
        self.check_online()?;
        let mut blogs = self.blogs.lock().await.clone();
        blogs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(blogs)
    }

    async fn update_blog(&self, id: i32, input: BlogInput) -> Result<Blog, DatabaseError> {
        self.check_online()?;
        let mut blogs = self.blogs.lock().await;
        let blog = blogs
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| DatabaseError::NotFound(BLOG_NOT_FOUND.to_string()))?;
        blog.title = input.title;
        blog.content = input.content;
        blog.author = input.author;
        if let Some(timestamp) = input.timestamp {
            blog.timestamp = timestamp;
        }
        Ok(blog.clone())
    }

    async fn delete_blog(&self, id: i32) -> Result<Blog, DatabaseError> {
        self.check_online()?;
        let mut blogs = self.blogs.lock().await;
        let index = blogs
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| DatabaseError::NotFound(BLOG_NOT_FOUND.to_string()))?;
        Ok(blogs.remove(index))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check_online()
    }
}

/// Auth service with the minimum bcrypt cost to keep tests fast
pub fn test_auth() -> AuthService {
    AuthService::new(TEST_SECRET, Duration::hours(1), 4)
}

pub fn test_state(require_auth_for_writes: bool) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::new(store.clone(), store.clone(), test_auth(), require_auth_for_writes);
    (state, store)
}

/// Drive one request through the router and decode the JSON body
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
