use sqlx::PgPool;
use tracing::{error, info};

pub const CREATE_BLOGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS blogs (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        content TEXT NOT NULL,
        author VARCHAR(255) NOT NULL,
        timestamp TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

pub const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) UNIQUE NOT NULL,
        password VARCHAR(255) NOT NULL
    )
"#;

/// Ensure the `blogs` and `users` tables exist.
///
/// Each statement is attempted independently; failures are logged and never
/// abort startup. Returns the number of tables that were confirmed.
pub async fn init_schema(pool: &PgPool) -> usize {
    let mut confirmed = 0;

    for (table, ddl) in [("blogs", CREATE_BLOGS_TABLE), ("users", CREATE_USERS_TABLE)] {
        match sqlx::query(ddl).execute(pool).await {
            Ok(_) => {
                info!("Table '{}' is ready", table);
                confirmed += 1;
            }
            Err(e) => error!("Error creating table '{}': {}", table, e),
        }
    }

    confirmed
}
