//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// モデル呼び出しのエラー
///
/// 資格情報エラーの判定はメッセージ文字列でも行うため、
/// `MissingApiKey` / `InvalidApiKey` の表示文言は変更しないこと。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("API key not found")]
    MissingApiKey,

    #[error("API key is invalid: {0}")]
    InvalidApiKey(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Schema violation in {prompt}: {message}")]
    Schema { prompt: &'static str, message: String },
}

impl ModelError {
    /// APIキーの欠落・不正によるエラーかどうか
    pub fn is_credential_error(&self) -> bool {
        match self {
            ModelError::MissingApiKey | ModelError::InvalidApiKey(_) => true,
            other => {
                let message = other.to_string();
                message.contains("API key not found") || message.contains("API key is invalid")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_invalid_data_uri() {
        let error = Error::InvalidDataUri("missing base64 marker".to_string());
        assert_eq!(format!("{}", error), "Invalid data URI: missing base64 marker");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_missing_api_key_is_credential_error() {
        assert!(ModelError::MissingApiKey.is_credential_error());
        assert_eq!(ModelError::MissingApiKey.to_string(), "API key not found");
    }

    #[test]
    fn test_invalid_api_key_is_credential_error() {
        let err = ModelError::InvalidApiKey("API key not valid".to_string());
        assert!(err.is_credential_error());
        assert!(err.to_string().starts_with("API key is invalid"));
    }

    #[test]
    fn test_credential_detected_from_message() {
        // 上流がHTTPエラーとして返してきてもメッセージで判定する
        let err = ModelError::Http {
            status: 400,
            message: "API key not found. Please pass a valid API key.".to_string(),
        };
        assert!(err.is_credential_error());
    }

    #[test]
    fn test_other_errors_are_not_credential() {
        let errors = vec![
            ModelError::Http { status: 429, message: "quota exceeded".to_string() },
            ModelError::Transport("connection reset".to_string()),
            ModelError::EmptyResponse,
            ModelError::Schema { prompt: "diagnoseLeafDisease", message: "missing field".to_string() },
        ];
        for err in errors {
            assert!(!err.is_credential_error(), "誤判定: {:?}", err);
        }
    }
}
