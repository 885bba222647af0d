#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use student_management_api::config::AppConfig;
use student_management_api::database::{DocumentStore, MemoryStore};
use student_management_api::router;
use student_management_api::state::AppState;

pub const JWT_SECRET: &str = "integration-test-secret";
pub const USERNAME: &str = "registrar";
pub const PASSWORD: &str = "correct-horse-battery";

/// One running server with its own empty store.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    /// Bearer token for `USERNAME`, registered at spawn.
    pub token: String,
}

pub fn test_config() -> Result<AppConfig> {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("STORAGE_BACKEND", "memory"),
        ("JWT_SECRET", JWT_SECRET),
        ("BCRYPT_COST", "4"),
        ("SECURITY_ENABLE_CORS", "false"),
    ]);
    Ok(AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))?)
}

/// Serve the real router on an ephemeral port over `store`.
pub async fn serve_with(store: Arc<dyn DocumentStore>, config: AppConfig) -> Result<String> {
    let app = router::app(AppState::new(store, config));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{}", addr))
}

pub async fn spawn_app() -> Result<TestApp> {
    let base_url = serve_with(Arc::new(MemoryStore::new()), test_config()?).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/register", base_url))
        .json(&json!({ "username": USERNAME, "password": PASSWORD }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

    let res = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({ "username": USERNAME, "password": PASSWORD }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
    let body: Value = res.json().await?;
    let token = body["token"]
        .as_str()
        .context("login response has no token")?
        .to_string();

    Ok(TestApp {
        base_url,
        client,
        token,
    })
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).bearer_auth(&self.token).send().await?)
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).bearer_auth(&self.token).send().await?)
    }
}

pub fn student(id: i64, email: &str) -> Value {
    json!({
        "Student_ID": id,
        "StudentStatus": "Active",
        "YearLevel": 2,
        "FirstName": "Juan",
        "LastName": "Dela Cruz",
        "Address": "45 Mabini St, Quezon City",
        "Email": email,
        "Phone": 9171234567i64,
        "DateOfBirth": "2003-04-15",
        "PlaceOfBirth": "Cebu",
        "Sex": "Male",
        "Religion": "Catholic",
        "Nationality": "Filipino",
        "CivilStatus": "Single",
        "Course_ID": 1,
        "Subject_ID": 1,
        "Enrollment_ID": 1
    })
}

pub fn enrollment(id: i64, student_id: i64, course_id: i64) -> Value {
    json!({
        "Enrollment_ID": id,
        "Student_ID": student_id,
        "Course_ID": course_id,
        "EnrollmentDate": "2024-06-03"
    })
}

pub fn subject(id: i64, name: &str) -> Value {
    json!({
        "Subject_ID": id,
        "SubjectName": name,
        "SubjectDescription": format!("Introduction to {}", name),
        "Course_ID": 1
    })
}

/// Field names listed in a validation error body.
pub fn error_fields(body: &Value) -> Vec<String> {
    body["details"]
        .as_array()
        .map(|details| {
            details
                .iter()
                .filter_map(|d| d["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
