//! アップロード受付
//!
//! ドラッグ&ドロップ/クリック選択の状態遷移とMIMEタイプ検証。
//! ファイルの読み込み・送信はここでは行わない。

use crate::error::{Error, Result};

/// 受け付けるMIMEタイプの接頭辞
pub const ACCEPTED_MIME_PREFIX: &str = "image/";

/// 不正なファイル種別の通知タイトル
pub const INVALID_FILE_TYPE_TITLE: &str = "Invalid File Type";

/// 不正なファイル種別の通知本文
pub const INVALID_FILE_TYPE_MESSAGE: &str = "Please upload an image file (e.g., JPG, PNG, WEBP).";

/// 画像ファイルかどうかを宣言MIMEタイプで判定
pub fn validate_file_type(mime_type: &str) -> Result<()> {
    if mime_type.starts_with(ACCEPTED_MIME_PREFIX) {
        Ok(())
    } else {
        Err(Error::UnsupportedFileType(if mime_type.is_empty() {
            "unknown".to_string()
        } else {
            mime_type.to_string()
        }))
    }
}

/// アップロード領域の表示状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    DragHover,
    Disabled,
}

impl UploadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadState::Idle => "idle",
            UploadState::DragHover => "drag-hover",
            UploadState::Disabled => "disabled",
        }
    }
}

/// アップロード領域の状態機械
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadGate {
    dragging: bool,
    disabled: bool,
}

impl UploadGate {
    pub fn new(disabled: bool) -> Self {
        Self { dragging: false, disabled }
    }

    pub fn state(&self) -> UploadState {
        if self.disabled {
            UploadState::Disabled
        } else if self.dragging {
            UploadState::DragHover
        } else {
            UploadState::Idle
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.dragging = false;
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn drag_enter(&mut self) {
        if !self.disabled {
            self.dragging = true;
        }
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// ドロップ時。ファイルを処理すべきならtrue
    pub fn drop_files(&mut self) -> bool {
        self.dragging = false;
        !self.disabled
    }

    /// クリック/キー操作でファイル選択ダイアログを開けるか
    pub fn can_browse(&self) -> bool {
        !self.disabled
    }
}

/// 選択されたファイル群から先頭の1件だけを検証する
///
/// `files` は (ファイル, 宣言MIMEタイプ)。空ならNone。
pub fn select_first<F>(files: impl IntoIterator<Item = (F, String)>) -> Option<Result<F>> {
    files
        .into_iter()
        .next()
        .map(|(file, mime_type)| validate_file_type(&mime_type).map(|_| file))
}
