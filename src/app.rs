use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::{require_auth, require_auth_for_writes};
use crate::state::AppState;

/// Build the full HTTP surface around an explicit `AppState`
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes
        .merge(auth_public_routes())
        // Bearer-protected routes
        .merge(auth_routes(&state))
        .merge(blog_routes(&state))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/signup", post(auth::signup_post))
        .route("/login", post(auth::login_post))
}

fn auth_routes(state: &AppState) -> Router<AppState> {
    use handlers::auth;

    Router::new().route(
        "/whoami",
        get(auth::whoami_get).route_layer(from_fn_with_state(state.clone(), require_auth)),
    )
}

fn blog_routes(state: &AppState) -> Router<AppState> {
    use handlers::blogs;

    let guard = from_fn_with_state(state.clone(), require_auth_for_writes);

    Router::new()
        .route(
            "/blogs",
            get(blogs::blogs_get).merge(post(blogs::blogs_post).route_layer(guard.clone())),
        )
        .route(
            "/blogs/:id",
            put(blogs::blog_put)
                .delete(blogs::blog_delete)
                .route_layer(guard),
        )
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Blog API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "POST /signup, POST /login, GET /whoami (bearer)",
            "blogs": "GET /blogs, POST /blogs, PUT /blogs/:id, DELETE /blogs/:id",
            "health": "GET /health"
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.blogs.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
