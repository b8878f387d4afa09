use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use secrecy::Secret;
use serde_json::{Value, json};
use wiremock::MockServer;

use contact_relay::config::{Config, IntakeConfig, IntakeCredentials};
use contact_relay::relay::intake::WebhookIntake;
use contact_relay::relay::log::MemoryLog;
use contact_relay::relay::Relay;

pub const WEBHOOK_PATH: &str = "/webhook/contact";

/// A running relay wired to a mock intake endpoint.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub intake: MockServer,
    pub log: Arc<MemoryLog>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit JSON to the relay, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/send-email"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit form-urlencoded data to the relay, return (body, status).
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/send-email"))
            .form(data)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit a raw body with an explicit content type.
    pub async fn submit_raw(&self, content_type: &str, body: &'static str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/send-email"))
            .header("content-type", content_type)
            .body(body)
            .send()
            .await
            .expect("submit raw failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Requests the mock intake endpoint has received so far.
    pub async fn intake_requests(&self) -> Vec<wiremock::Request> {
        self.intake.received_requests().await.unwrap_or_default()
    }
}

pub fn basic_credentials() -> IntakeCredentials {
    IntakeCredentials {
        authorization: None,
        user: Some("relay".to_string()),
        pass: Some(Secret::new("s3cret".to_string())),
    }
}

pub fn test_config(intake_url: &str, credentials: IntakeCredentials) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 16 * 1024,
        cors_origins: vec!["https://consulta.example".to_string()],
        log_level: "warn".to_string(),
        intake: IntakeConfig {
            url: intake_url.parse().unwrap(),
            credentials,
        },
    }
}

/// Spawn the relay against a fresh mock intake server.
pub async fn spawn_app(credentials: IntakeCredentials) -> TestApp {
    let intake = MockServer::start().await;
    let config = test_config(&format!("{}{WEBHOOK_PATH}", intake.uri()), credentials);

    let log = Arc::new(MemoryLog::new());
    let addr = serve(&config, log.clone()).await;

    TestApp {
        addr,
        client: Client::new(),
        intake,
        log,
    }
}

/// Spawn the relay pointed at an arbitrary intake URL, return its address
/// and failure log.
pub async fn spawn_app_with_intake_url(
    intake_url: &str,
    credentials: IntakeCredentials,
) -> (SocketAddr, Arc<MemoryLog>) {
    let config = test_config(intake_url, credentials);
    let log = Arc::new(MemoryLog::new());
    let addr = serve(&config, log.clone()).await;
    (addr, log)
}

async fn serve(config: &Config, log: Arc<MemoryLog>) -> SocketAddr {
    let relay = Relay::new(
        config.intake.credentials.clone(),
        Arc::new(WebhookIntake::new(config.intake.url.clone())),
        log,
    );
    let app = contact_relay::build_router(config, relay);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    addr
}
