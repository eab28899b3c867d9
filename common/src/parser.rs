//! APIレスポンスパーサー
//!
//! モデルの応答テキストからJSONを抽出し、プロンプトの出力型へ変換する

use serde::de::DeserializeOwned;

use crate::error::{Error, ModelError, Result};
use crate::prompts::Prompt;

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use leaf_ai_common::extract_json;
///
/// let response = "Sure: {\"report\": \"value\"}";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"report\": \"value\"}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の {...} を探す
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// 応答テキストを任意の型へパース
pub fn parse_json_response<T: DeserializeOwned>(response: &str) -> Result<T> {
    let json_str = extract_json(response)?;
    let value = serde_json::from_str(json_str.trim())?;
    Ok(value)
}

/// プロンプトの出力としてパースし、出力制約も検証する
pub fn parse_prompt_output<P: Prompt>(response: &str) -> std::result::Result<P::Output, ModelError> {
    let schema_error = |message: String| ModelError::Schema {
        prompt: P::KIND.name(),
        message,
    };

    let output: P::Output = parse_json_response(response).map_err(|e| schema_error(e.to_string()))?;
    P::validate(&output).map_err(schema_error)?;
    Ok(output)
}
