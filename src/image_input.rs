//! 画像ファイルの読み込み
//!
//! 宣言MIMEタイプ（拡張子から推定、不明なら中身から判定）が image/ で始まるもののみ受け付ける。

use crate::error::{LeafAiError, Result};
use leaf_ai_common::{validate_file_type, ImageDataUri};
use std::path::Path;

/// ファイルのMIMEタイプを推定
pub fn detect_mime_type(path: &Path, bytes: &[u8]) -> Option<String> {
    mime_guess::from_path(path)
        .first_raw()
        .map(str::to_string)
        .or_else(|| {
            image::guess_format(bytes)
                .ok()
                .map(|format| format.to_mime_type().to_string())
        })
}

/// 画像ファイルを読み込みData URIに変換
pub fn load_image(path: &Path) -> Result<ImageDataUri> {
    if !path.is_file() {
        return Err(LeafAiError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let mime_type = detect_mime_type(path, &bytes).unwrap_or_default();

    validate_file_type(&mime_type).map_err(|_| {
        LeafAiError::UnsupportedFileType(format!("{} ({})", path.display(), mime_type))
    })?;

    log::debug!("loaded {} as {} ({} bytes)", path.display(), mime_type, bytes.len());
    Ok(ImageDataUri::from_bytes(&mime_type, &bytes))
}
