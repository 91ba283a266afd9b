use std::sync::Arc;

use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::database::{BlogStore, PgStore, UserStore};

/// Everything a handler needs, built once at startup and cloned per request
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub blogs: Arc<dyn BlogStore>,
    pub auth: AuthService,
    pub require_auth_for_writes: bool,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        blogs: Arc<dyn BlogStore>,
        auth: AuthService,
        require_auth_for_writes: bool,
    ) -> Self {
        Self {
            users,
            blogs,
            auth,
            require_auth_for_writes,
        }
    }

    /// Wire both stores to one Postgres pool
    pub fn from_config(config: &AppConfig, store: PgStore) -> Self {
        let store = Arc::new(store);
        Self::new(
            store.clone(),
            store,
            AuthService::from_config(&config.security),
            config.security.require_auth_for_writes,
        )
    }
}
