//! Gemini APIクライアント（reqwest）
//!
//! リクエスト/レスポンス型は leaf_ai_common::gemini と共有

use crate::config::Config;
use crate::error::Result;
use leaf_ai_common::gemini::{
    classify_error_response, generate_content_url, GeminiRequest, GeminiResponse,
    DEFAULT_TEMPERATURE,
};
use leaf_ai_common::{GenerativeModel, ModelError, PromptRequest};
use std::time::Duration;

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    /// APIキーは明示的に渡す。Noneの場合は呼び出し時に資格情報エラーになる
    pub fn new(api_key: Option<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key,
            model: model.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.resolve_api_key(),
            config.model.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: &PromptRequest<'_>) -> std::result::Result<String, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;
        let body = GeminiRequest::from_prompt(request, DEFAULT_TEMPERATURE);

        // URLにAPIキーが含まれるため、エラー文言からURLを除く
        let response = self
            .http
            .post(generate_content_url(&self.model, api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_error_response(status.as_u16(), &text));
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Transport(e.without_url().to_string()))?;

        payload.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaf_ai_common::prompts::{DiseaseReportInput, Prompt};

    #[tokio::test]
    async fn test_missing_api_key_fails_before_request() {
        let client = GeminiClient::new(None, "gemini-2.0-flash", Duration::from_secs(5)).unwrap();
        assert!(!client.has_api_key());

        let input = DiseaseReportInput { disease_name: "Apple scab".into() };
        let err = client.generate(&input.to_request()).await.unwrap_err();
        assert_eq!(err, ModelError::MissingApiKey);
    }

    #[test]
    fn test_from_config_uses_model() {
        let config = Config { model: "gemini-1.5-flash".into(), ..Default::default() };
        let client = GeminiClient::from_config(&config).unwrap();
        assert_eq!(client.model_name(), "gemini-1.5-flash");
    }

    /// キー未設定のまま診断すると資格情報メッセージになる
    #[tokio::test]
    async fn test_missing_api_key_reaches_credential_message() {
        let config = Config { api_key: None, ..Default::default() };
        let client = GeminiClient::new(config.api_key.clone(), config.model.clone(), Duration::from_secs(5)).unwrap();
        let photo = leaf_ai_common::ImageDataUri::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();

        let outcome = leaf_ai_common::LeafDiagnoser::new(client).diagnose(&photo).await;
        assert_eq!(outcome.error(), Some(leaf_ai_common::pipeline::CREDENTIAL_ERROR_MESSAGE));
    }
}
