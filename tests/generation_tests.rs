// tests/generation_tests.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use upflux::{
    analytics::stagnation::StagnationFormula,
    config::{Config, GroqConfig},
    error::GENERATION_FAILED_MESSAGE,
    generation::{CompletionClient, GenerationError},
    routes,
    state::AppState,
    store::MemoryStore,
};

/// Completion client that replays a fixed answer and records prompts.
struct CannedCompletions {
    response: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl CompletionClient for CannedCompletions {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response
            .clone()
            .map_err(GenerationError::UpstreamFailure)
    }
}

struct TestApp {
    address: String,
    token: String,
    completions: Arc<CannedCompletions>,
}

async fn spawn_app(response: Result<&str, &str>) -> TestApp {
    spawn_app_with_limit(response, 64 * 1024).await
}

async fn spawn_app_with_limit(response: Result<&str, &str>, max_syllabus_bytes: usize) -> TestApp {
    let completions = Arc::new(CannedCompletions {
        response: response.map(str::to_string).map_err(str::to_string),
        prompts: Mutex::new(Vec::new()),
    });

    let config = Config {
        database_url: None,
        jwt_secret: "generation_test_secret".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        port: 0,
        groq: GroqConfig {
            api_key: "unused".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            model: "test-model".to_string(),
            temperature: 0.7,
            timeout_secs: None,
        },
        stagnation_formula: StagnationFormula::Weighted,
        max_syllabus_bytes,
    };

    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        attempts: store.clone(),
        users: store,
        completions: completions.clone(),
        config,
    };
    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let credentials = serde_json::json!({ "username": "learner", "password": "password123" });
    client
        .post(format!("{}/api/auth/register", address))
        .json(&credentials)
        .send()
        .await
        .unwrap();
    let login = client
        .post(format!("{}/api/auth/login", address))
        .json(&credentials)
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();

    TestApp {
        address,
        token: login["token"].as_str().unwrap().to_string(),
        completions,
    }
}

fn syllabus_form(text: &str, mime: &str, difficulty: Option<&str>) -> Form {
    let part = Part::bytes(text.as_bytes().to_vec())
        .file_name("syllabus.txt")
        .mime_str(mime)
        .unwrap();
    let form = Form::new().part("file", part);
    match difficulty {
        Some(d) => form.text("difficulty", d.to_string()),
        None => form,
    }
}

async fn post_generate(app: &TestApp, form: Form) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/api/quiz/generate", app.address))
        .bearer_auth(&app.token)
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request")
}

const MODEL_REPLY: &str = "Here you go:\n[{\"question\":\"Q\",\"options\":[\"A\",\"B\",\"C\",\"D\"],\"correctAnswer\":\"B\"}]\nThanks";

#[tokio::test]
async fn generates_quiz_from_text_syllabus() {
    let app = spawn_app(Ok(MODEL_REPLY)).await;

    let response = post_generate(
        &app,
        syllabus_form("Week 1: Binary search trees", "text/plain", Some("hard")),
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);

    let quiz: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(quiz.len(), 1);
    assert_eq!(quiz[0]["question"], "Q");
    assert_eq!(quiz[0]["correctAnswer"], "B");

    let prompts = app.completions.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Week 1: Binary search trees"));
    assert!(prompts[0].contains("10 hard level"));
}

#[tokio::test]
async fn difficulty_defaults_to_medium() {
    let app = spawn_app(Ok(MODEL_REPLY)).await;

    let response = post_generate(&app, syllabus_form("Graphs", "text/plain", None)).await;
    assert_eq!(response.status().as_u16(), 200);

    let prompts = app.completions.prompts.lock().unwrap();
    assert!(prompts[0].contains("10 medium level"));
}

#[tokio::test]
async fn missing_file_is_bad_request() {
    let app = spawn_app(Ok(MODEL_REPLY)).await;

    let form = Form::new().text("difficulty", "easy");
    let response = post_generate(&app, form).await;
    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No file uploaded");
    assert!(app.completions.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn binary_upload_is_rejected_before_model_call() {
    let app = spawn_app(Ok(MODEL_REPLY)).await;

    let response = post_generate(&app, syllabus_form("%PDF-1.7", "application/pdf", None)).await;
    assert_eq!(response.status().as_u16(), 415);
    assert!(app.completions.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_upload_is_payload_too_large() {
    let app = spawn_app_with_limit(Ok(MODEL_REPLY), 1024).await;

    let syllabus = "Recursion and loops. ".repeat(200);
    let response = post_generate(&app, syllabus_form(&syllabus, "text/plain", None)).await;
    assert_eq!(response.status().as_u16(), 413);
    assert!(app.completions.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unparseable_model_output_is_generic_failure() {
    let raw = "Sorry, I can only answer in prose. SECRET-MODEL-TEXT";
    let app = spawn_app(Ok(raw)).await;

    let response = post_generate(&app, syllabus_form("Loops", "text/plain", None)).await;
    assert_eq!(response.status().as_u16(), 502);

    let body = response.text().await.unwrap();
    assert!(!body.contains("SECRET-MODEL-TEXT"));
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["error"], GENERATION_FAILED_MESSAGE);
}

#[tokio::test]
async fn invalid_questions_are_generic_failure() {
    let raw = r#"[{"question":"Q","options":["A","B","C","D"],"correctAnswer":"Z"}]"#;
    let app = spawn_app(Ok(raw)).await;

    let response = post_generate(&app, syllabus_form("Loops", "text/plain", None)).await;
    assert_eq!(response.status().as_u16(), 502);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], GENERATION_FAILED_MESSAGE);
}

#[tokio::test]
async fn upstream_failure_is_indistinguishable_from_parse_failure() {
    let app = spawn_app(Err("connection refused")).await;

    let response = post_generate(&app, syllabus_form("Loops", "text/plain", None)).await;
    assert_eq!(response.status().as_u16(), 502);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], GENERATION_FAILED_MESSAGE);
}

#[tokio::test]
async fn generation_requires_login() {
    let app = spawn_app(Ok(MODEL_REPLY)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/quiz/generate", app.address))
        .multipart(syllabus_form("Loops", "text/plain", None))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
    assert!(app.completions.prompts.lock().unwrap().is_empty());
}
