//! 実APIを使った統合テスト（GEMINI_API_KEY 未設定ならスキップ）

use leaf_ai::gemini::GeminiClient;
use leaf_ai_common::gemini::DEFAULT_MODEL;
use leaf_ai_common::prompts::DiseaseReportInput;
use leaf_ai_common::{run_prompt, GenerativeModel, ModelError};
use std::time::Duration;

fn api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}

#[tokio::test]
async fn gemini_report_integration() {
    let Some(key) = api_key() else {
        eprintln!("GEMINI_API_KEY not set; skipping integration test");
        return;
    };

    let client = GeminiClient::new(Some(key), DEFAULT_MODEL, Duration::from_secs(60)).unwrap();
    let input = DiseaseReportInput { disease_name: "Late blight".into() };
    let report = run_prompt(&client, &input).await.expect("report prompt failed");

    assert!(!report.report.trim().is_empty());
}

#[tokio::test]
async fn gemini_invalid_key_is_credential_error() {
    if api_key().is_none() {
        eprintln!("GEMINI_API_KEY not set; skipping integration test");
        return;
    }

    let client = GeminiClient::new(
        Some("invalid-key-for-test".into()),
        DEFAULT_MODEL,
        Duration::from_secs(30),
    )
    .unwrap();
    let input = DiseaseReportInput { disease_name: "Apple scab".into() };
    let err: ModelError = client
        .generate(&leaf_ai_common::Prompt::to_request(&input))
        .await
        .unwrap_err();

    assert!(err.is_credential_error(), "unexpected error: {}", err);
}
