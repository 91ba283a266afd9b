#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    /// Spawn the server binary against the database in `DATABASE_URL`.
    ///
    /// Returns `None` when no database is configured so the suite can run
    /// without Postgres.
    pub async fn start() -> Result<Option<Self>> {
        let _ = dotenvy::dotenv();
        if std::env::var("DATABASE_URL").map(|v| v.is_empty()).unwrap_or(true) {
            eprintln!("DATABASE_URL not set, skipping integration test");
            return Ok(None);
        }

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_blog-api"))
            .env("PORT", port.to_string())
            .env("JWT_SECRET", JWT_SECRET)
            .env("REQUIRE_AUTH_FOR_WRITES", "true")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        let server = Self { port, base_url, child };
        server.wait_ready(Duration::from_secs(15)).await?;
        Ok(Some(server))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ready once the database answers and the schema exists
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(self.url("/blogs")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Email that no earlier run has registered
pub fn unique_email(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{}-{}@example.com", prefix, nanos)
}

pub async fn signup_and_login(server: &TestServer, email: &str, password: &str) -> Result<String> {
    let client = reqwest::Client::new();
    client
        .post(server.url("/signup"))
        .json(&serde_json::json!({ "name": "Test", "email": email, "password": password }))
        .send()
        .await?;

    let body: serde_json::Value = client
        .post(server.url("/login"))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await?
        .json()
        .await?;

    body["token"]
        .as_str()
        .map(str::to_string)
        .context("login response had no token")
}
