use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use campus_api::clients::SchoolClient;
use campus_api::config::{
    AppConfig, DatabaseConfig, HttpConfig, SchoolServiceConfig, SecurityConfig,
};
use campus_api::database::Stores;
use campus_api::{app, AppState};

pub const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

/// Spawn the full app on an ephemeral port with in-memory stores. Each
/// test gets its own server so state never leaks between tests. The
/// school client points back at the same server, so composite reads
/// exercise the real HTTP seam.
pub async fn spawn_server() -> Result<TestServer> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind ephemeral port")?;
    let addr = listener.local_addr()?;
    let base_url = format!("http://{}", addr);

    let config = AppConfig {
        http: HttpConfig { port: addr.port() },
        security: SecurityConfig {
            jwt_secret: JWT_SECRET.to_string(),
            jwt_expiry_hours: 1,
        },
        database: DatabaseConfig {
            url: None,
            max_connections: 5,
        },
        school_service: SchoolServiceConfig {
            base_url: Some(base_url.clone()),
            timeout_secs: 2,
        },
    };
    config.validate()?;

    let school_client = SchoolClient::new(base_url.clone(), Duration::from_secs(2))?;
    let state = AppState {
        config: Arc::new(config),
        stores: Stores::in_memory(),
        school_client,
    };

    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.expect("server");
    });

    Ok(TestServer {
        base_url,
        client: reqwest::Client::new(),
    })
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/api/auth/register"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    pub async fn register_and_login(&self, username: &str, password: &str) -> Result<String> {
        let res = self.register(username, password).await?;
        anyhow::ensure!(res.status().is_success(), "register failed: {}", res.status());

        let res = self.login(username, password).await?;
        anyhow::ensure!(res.status().is_success(), "login failed: {}", res.status());

        let body: serde_json::Value = res.json().await?;
        Ok(body["token"]
            .as_str()
            .context("login response missing token")?
            .to_string())
    }
}
