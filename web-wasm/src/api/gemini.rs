//! Gemini API連携（fetch）
//!
//! リクエスト/レスポンス型は leaf_ai_common::gemini と共有

use leaf_ai_common::gemini::{
    classify_error_response, generate_content_url, GeminiRequest, GeminiResponse, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};
use leaf_ai_common::{GenerativeModel, ModelError, PromptRequest};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// ブラウザから直接Geminiを呼ぶクライアント
pub struct WasmGeminiClient {
    api_key: Option<String>,
    model: String,
}

impl WasmGeminiClient {
    /// 空文字のAPIキーは未設定として扱う
    pub fn new(api_key: &str) -> Self {
        let api_key = Some(api_key.trim().to_string()).filter(|key| !key.is_empty());
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

fn transport_error(value: JsValue) -> ModelError {
    ModelError::Transport(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// fetchでPOSTする
async fn post_json(url: &str, body: &str) -> Result<Response, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    resp_value.dyn_into()
}

async fn read_text(resp: &Response) -> Result<String, JsValue> {
    let text = JsFuture::from(resp.text()?).await?;
    Ok(text.as_string().unwrap_or_default())
}

impl GenerativeModel for WasmGeminiClient {
    async fn generate(&self, request: &PromptRequest<'_>) -> Result<String, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;
        let body = serde_json::to_string(&GeminiRequest::from_prompt(request, DEFAULT_TEMPERATURE))
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let resp = post_json(&generate_content_url(&self.model, api_key), &body)
            .await
            .map_err(transport_error)?;

        if !resp.ok() {
            let text = read_text(&resp).await.unwrap_or_default();
            return Err(classify_error_response(resp.status(), &text));
        }

        let json = JsFuture::from(resp.json().map_err(transport_error)?)
            .await
            .map_err(transport_error)?;
        let response: GeminiResponse = serde_wasm_bindgen::from_value(json)
            .map_err(|e| ModelError::Transport(e.to_string()))?;
        response.into_text()
    }
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use leaf_ai_common::prompts::{DiseaseReportInput, Prompt};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn wasm_missing_api_key_fails_before_fetch() {
        let client = WasmGeminiClient::new("");
        let input = DiseaseReportInput { disease_name: "Late blight".into() };
        let err = client.generate(&input.to_request()).await.unwrap_err();
        assert_eq!(err, ModelError::MissingApiKey);
    }
}
