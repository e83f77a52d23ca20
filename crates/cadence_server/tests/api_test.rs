//! End-to-end tests of the HTTP surface over a real socket.

mod test_utils;

use reqwest::StatusCode;
use serde_json::{Value, json};
use std::time::Duration;
use test_utils::{EchoGenerator, TestApp};

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let app = TestApp::spawn(EchoGenerator::new(Duration::ZERO), 10, 5, Duration::from_secs(5)).await?;

    let response = app.client.get(app.url("/health")).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<Value>().await?, json!({"status": "ok"}));

    app.shutdown().await
}

#[tokio::test]
async fn analyze_returns_matched_skills_without_upstream_call() -> anyhow::Result<()> {
    let app = TestApp::spawn(EchoGenerator::new(Duration::ZERO), 10, 5, Duration::from_secs(5)).await?;

    let response = app
        .client
        .post(app.url("/analyze"))
        .body("Built services in Java, shipped with Docker on Kubernetes.")
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let skills: Vec<String> = response.json().await?;
    assert_eq!(skills, vec!["Java", "Docker", "Kubernetes"]);
    assert_eq!(app.queue.metrics().submitted(), 0);
    assert_eq!(app.worker.metrics().upstream_calls(), 0);

    app.shutdown().await
}

#[tokio::test]
async fn generate_returns_worker_text() -> anyhow::Result<()> {
    let app = TestApp::spawn(EchoGenerator::new(Duration::ZERO), 10, 5, Duration::from_secs(5)).await?;

    let response = app
        .client
        .post(app.url("/generate"))
        .json(&json!({
            "cv_text": "Rust developer",
            "experience_level": "Junior",
            "question_type": "theoretical",
            "selected_skills": ["Rust", "SQL"],
            "job_description": "Backend engineer"
        }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let text = response.text().await?;
    assert!(text.contains("for a Junior candidate"));
    assert!(text.contains("Focus ONLY on the following technical skills: Rust, SQL."));
    assert!(text.contains("Generate ONLY theoretical/conceptual questions."));
    assert!(text.contains("Backend engineer"));

    app.shutdown().await
}

#[tokio::test]
async fn upload_forwards_as_mixed_without_skills() -> anyhow::Result<()> {
    let app = TestApp::spawn(EchoGenerator::new(Duration::ZERO), 10, 5, Duration::from_secs(5)).await?;

    let text = app
        .client
        .post(app.url("/upload"))
        .json(&json!({"cvText": "Go and Python", "experienceLevel": "Mid"}))
        .send()
        .await?
        .text()
        .await?;

    assert!(text.contains("Generate a mix of theoretical and practical questions."));
    assert!(text.contains("Focus on the skills mentioned in the CV."));

    app.shutdown().await
}

#[tokio::test]
async fn saturated_gate_refuses_with_429() -> anyhow::Result<()> {
    let app = TestApp::spawn(
        EchoGenerator::new(Duration::from_millis(800)),
        10,
        1,
        Duration::from_secs(10),
    )
    .await?;

    let first = tokio::spawn({
        let client = app.client.clone();
        let url = app.url("/analyze-code");
        async move { client.post(url).body("fn slow() {}").send().await }
    });
    tokio::time::sleep(Duration::from_millis(200)).await;

    let refused = app
        .client
        .post(app.url("/analyze-code"))
        .body("fn refused() {}")
        .send()
        .await?;
    assert_eq!(refused.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(refused.text().await?.contains("Server limit reached (1 active requests)"));

    let first = first.await??;
    assert_eq!(first.status(), StatusCode::OK);

    // Only the admitted request created a task.
    assert_eq!(app.queue.metrics().submitted(), 1);
    let metrics = app.metrics().await?;
    assert_eq!(metrics["gates"][1]["name"], "analysis");
    assert_eq!(metrics["gates"][1]["available"], 1);

    app.shutdown().await
}

#[tokio::test]
async fn gates_are_independent() -> anyhow::Result<()> {
    let app = TestApp::spawn(
        EchoGenerator::new(Duration::from_millis(300)),
        10,
        1,
        Duration::from_secs(10),
    )
    .await?;

    let analysis = tokio::spawn({
        let client = app.client.clone();
        let url = app.url("/analyze-code");
        async move { client.post(url).body("fn busy() {}").send().await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let generated = app
        .client
        .post(app.url("/generate"))
        .json(&json!({"cv_text": "SQL", "experience_level": "Senior"}))
        .send()
        .await?;
    assert_eq!(generated.status(), StatusCode::OK);
    assert_eq!(analysis.await??.status(), StatusCode::OK);

    app.shutdown().await
}

#[tokio::test]
async fn slow_task_times_out_with_408_and_releases_permit() -> anyhow::Result<()> {
    let app = TestApp::spawn(
        EchoGenerator::new(Duration::from_secs(2)),
        1,
        5,
        Duration::from_millis(200),
    )
    .await?;

    let response = app
        .client
        .post(app.url("/generate"))
        .json(&json!({"cv_text": "Java", "experience_level": "Senior"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert_eq!(
        response.text().await?,
        "Request timed out. The server is under heavy load."
    );

    let metrics = app.metrics().await?;
    assert_eq!(metrics["gates"][0]["name"], "generation");
    assert_eq!(metrics["gates"][0]["available"], 1);
    // The task itself keeps running.
    assert_eq!(metrics["worker"]["submitted"], 1);

    app.shutdown().await
}

#[tokio::test]
async fn upstream_failure_is_ordinary_text() -> anyhow::Result<()> {
    let app = TestApp::spawn(EchoGenerator::failing(), 10, 5, Duration::from_secs(5)).await?;

    let response = app
        .client
        .post(app.url("/analyze-code"))
        .body("let x = 1;")
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let text = response.text().await?;
    assert!(text.starts_with("Error analyzing code: "));
    assert!(text.contains("API key not valid"));

    app.shutdown().await
}

#[tokio::test]
async fn stopped_worker_yields_500() -> anyhow::Result<()> {
    let mut app = TestApp::spawn(EchoGenerator::new(Duration::ZERO), 10, 5, Duration::from_secs(5)).await?;
    app.worker.stop().await?;

    let response = app
        .client
        .post(app.url("/analyze-code"))
        .body("fn main() {}")
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().await?.contains("Task queue is closed"));

    let metrics = app.metrics().await?;
    assert_eq!(metrics["gates"][1]["available"], 5);

    app.shutdown().await
}

#[tokio::test]
async fn malformed_json_is_rejected_before_admission() -> anyhow::Result<()> {
    let app = TestApp::spawn(EchoGenerator::new(Duration::ZERO), 10, 5, Duration::from_secs(5)).await?;

    let response = app
        .client
        .post(app.url("/generate"))
        .header("content-type", "application/json")
        .body("{\"cv_text\": 42}")
        .send()
        .await?;
    assert!(response.status().is_client_error());
    assert_ne!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(app.queue.metrics().submitted(), 0);

    app.shutdown().await
}
