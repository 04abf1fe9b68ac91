#![allow(dead_code)]

use reqwest::Client;
use serde_json::{json, Value};
use skill_assessment::{router, AppState, Config};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    _data_dir: TempDir,
}

async fn wait_for_server(client: &Client, base_url: &str) {
    for _ in 0..50 {
        if client
            .get(format!("{}/health", base_url))
            .send()
            .await
            .is_ok()
        {
            return;
        }
        sleep(Duration::from_millis(100)).await;
    }
    panic!("Server did not start in time");
}

/// Serves the router on an ephemeral port with a fresh data directory.
pub async fn spawn_server() -> TestServer {
    spawn_server_with(Config::default()).await
}

pub async fn spawn_server_with(mut config: Config) -> TestServer {
    let data_dir = TempDir::new().expect("Failed to create temp dir");
    config.data_dir = data_dir.path().to_string_lossy().into_owned();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local addr");
    let app = router(AppState::new(config));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let base_url = format!("http://{}", addr);
    let client = Client::new();
    wait_for_server(&client, &base_url).await;

    TestServer {
        base_url,
        client,
        _data_dir: data_dir,
    }
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn create_designer(&self, name: &str) -> String {
        let resp = self
            .client
            .post(self.url("/designers"))
            .json(&json!({ "name": name }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(resp.status(), 201);
        let body: Value = resp.json().await.expect("Failed to parse JSON");
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn pointer(&self, id: &str, skill: &str, event: Value) -> (u16, Value) {
        let resp = self
            .client
            .post(self.url(&format!("/designers/{}/skills/{}/pointer", id, skill)))
            .json(&event)
            .send()
            .await
            .expect("Failed to send request");
        let status = resp.status().as_u16();
        let body: Value = resp.json().await.expect("Failed to parse JSON");
        (status, body)
    }

    pub async fn assessment(&self, id: &str) -> Value {
        let resp = self
            .client
            .get(self.url(&format!("/designers/{}/assessment", id)))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(resp.status(), 200);
        resp.json().await.expect("Failed to parse JSON")
    }

    pub async fn save(&self, id: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .put(self.url(&format!("/designers/{}/assessment", id)))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request");
        let status = resp.status().as_u16();
        let body: Value = resp.json().await.expect("Failed to parse JSON");
        (status, body)
    }
}

/// Proficiency of `skill` in an assessment response body.
pub fn proficiency_of(assessment: &Value, skill: &str) -> u64 {
    assessment["skills"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == skill)
        .unwrap_or_else(|| panic!("skill {} missing", skill))["proficiency"]
        .as_u64()
        .unwrap()
}
