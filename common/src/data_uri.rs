//! 画像Data URI
//!
//! `data:<mimetype>;base64,<encoded_data>` 形式の文字列を扱う

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

const DATA_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Base64エンコード済み画像（MIMEタイプ付き）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageDataUri {
    uri: String,
    // "data:" の直後から ";base64," の手前まで
    mime_end: usize,
}

impl ImageDataUri {
    /// Data URI文字列を検証して取り込む
    pub fn parse(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        if !uri.starts_with(DATA_SCHEME) {
            return Err(Error::InvalidDataUri("data: スキームがありません".into()));
        }
        let mime_end = uri
            .find(BASE64_MARKER)
            .ok_or_else(|| Error::InvalidDataUri("base64 マーカーがありません".into()))?;
        if mime_end == DATA_SCHEME.len() {
            return Err(Error::InvalidDataUri("MIMEタイプが空です".into()));
        }
        if uri.len() == mime_end + BASE64_MARKER.len() {
            return Err(Error::InvalidDataUri("データ部が空です".into()));
        }
        Ok(Self { uri, mime_end })
    }

    /// 生バイト列からData URIを生成
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        let encoded = general_purpose::STANDARD.encode(bytes);
        let uri = format!("{}{}{}{}", DATA_SCHEME, mime_type, BASE64_MARKER, encoded);
        let mime_end = DATA_SCHEME.len() + mime_type.len();
        Self { uri, mime_end }
    }

    pub fn mime_type(&self) -> &str {
        &self.uri[DATA_SCHEME.len()..self.mime_end]
    }

    pub fn base64_data(&self) -> &str {
        &self.uri[self.mime_end + BASE64_MARKER.len()..]
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl fmt::Display for ImageDataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

impl TryFrom<String> for ImageDataUri {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<ImageDataUri> for String {
    fn from(value: ImageDataUri) -> Self {
        value.uri
    }
}
