//! Gemini API ワイヤーフォーマット
//!
//! CLI(reqwest)とWeb(fetch)で共有するリクエスト/レスポンス型。
//! HTTP送信自体は各クレートが行う。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ModelError;
use crate::prompts::PromptRequest;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// generateContent のURL（APIキーはクエリで渡す）
pub fn generate_content_url(model: &str, api_key: &str) -> String {
    format!("{}/{}:generateContent?key={}", GEMINI_API_BASE, model, api_key)
}

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

impl GeminiRequest {
    /// プロンプトからリクエストを組み立てる（本文 → 画像の順）
    pub fn from_prompt(prompt: &PromptRequest<'_>, temperature: f32) -> Self {
        let mut parts = vec![Part::Text { text: prompt.text.clone() }];

        if let Some(image) = prompt.image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type().to_string(),
                    data: image.base64_data().to_string(),
                },
            });
        }

        Self {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature,
                response_mime_type: "application/json".to_string(),
                response_schema: Some(prompt.response_schema.clone()),
            },
        }
    }
}

/// Gemini APIレスポンス
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: ResponseContent,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: String,
}

impl GeminiResponse {
    /// 最初の候補のテキストを取り出す
    pub fn into_text(self) -> Result<String, ModelError> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(ModelError::EmptyResponse)
    }
}

/// Gemini APIのエラーボディ
#[derive(Debug, Deserialize)]
pub struct GeminiErrorBody {
    pub error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct GeminiErrorDetail {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

/// 非2xx応答をエラーへ分類
///
/// APIキー関連（`API_KEY_INVALID` / "API key" を含むメッセージ）は資格情報エラーにする。
pub fn classify_error_response(status: u16, body: &str) -> ModelError {
    let message = serde_json::from_str::<GeminiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    if body.contains("API_KEY_INVALID") || message.contains("API key") {
        return ModelError::InvalidApiKey(message);
    }

    ModelError::Http { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_uri::ImageDataUri;
    use crate::prompts::{DiseaseReportInput, Prompt, ReasonAboutPredictionInput};

    #[test]
    fn test_generate_content_url() {
        assert_eq!(
            generate_content_url("gemini-2.0-flash", "KEY"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key=KEY"
        );
    }

    #[test]
    fn test_request_from_image_prompt() {
        let photo = ImageDataUri::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();
        let input = ReasonAboutPredictionInput {
            photo: &photo,
            disease_prediction: "Healthy".to_string(),
            confidence_level: 0.95,
        };
        let request = GeminiRequest::from_prompt(&input.to_request(), DEFAULT_TEMPERATURE);

        let json = serde_json::to_value(&request).expect("シリアライズ失敗");
        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts[0]["text"].as_str().unwrap().contains("Healthy"));
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "iVBORw0KGgo=");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            json["generationConfig"]["responseSchema"]["required"][0],
            "confidenceAssessment"
        );
    }

    #[test]
    fn test_request_from_text_prompt() {
        let input = DiseaseReportInput { disease_name: "Late blight".to_string() };
        let request = GeminiRequest::from_prompt(&input.to_request(), 0.5);
        assert_eq!(request.contents[0].parts.len(), 1);

        let json = serde_json::to_string(&request).expect("シリアライズ失敗");
        assert!(json.contains("\"temperature\":0.5"));
    }

    #[test]
    fn test_part_text_serialize() {
        let part = Part::Text { text: "Hello".to_string() };
        assert_eq!(serde_json::to_string(&part).unwrap(), r#"{"text":"Hello"}"#);
    }

    #[test]
    fn test_response_into_text() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{ "text": "{\"report\": \"ok\"}" }]
                }
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(response.into_text().unwrap(), r#"{"report": "ok"}"#);
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let response: GeminiResponse = serde_json::from_str("{}").expect("デシリアライズ失敗");
        assert_eq!(response.into_text().unwrap_err(), ModelError::EmptyResponse);
    }

    #[test]
    fn test_classify_invalid_api_key() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT", "details": [{"reason": "API_KEY_INVALID"}]}}"#;
        let err = classify_error_response(400, body);
        assert!(matches!(err, ModelError::InvalidApiKey(_)));
        assert!(err.is_credential_error());
    }

    #[test]
    fn test_classify_quota_error() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = classify_error_response(429, body);
        assert_eq!(
            err,
            ModelError::Http { status: 429, message: "Resource has been exhausted".to_string() }
        );
        assert!(!err.is_credential_error());
    }

    #[test]
    fn test_classify_non_json_body() {
        let err = classify_error_response(502, "Bad Gateway\n");
        assert_eq!(err, ModelError::Http { status: 502, message: "Bad Gateway".to_string() });
    }
}
