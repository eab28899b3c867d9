//! PDFレイアウト
//!
//! A4縦・余白10mmのページ割り付け計算（CLI/WASM共通）。

use serde::Serialize;

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 10.0;

/// 1ページに描画できる高さ
pub const PRINTABLE_HEIGHT_MM: f32 = A4_HEIGHT_MM - MARGIN_MM * 2.0;

/// 描画できる幅
pub const PRINTABLE_WIDTH_MM: f32 = A4_WIDTH_MM - MARGIN_MM * 2.0;

/// ラスタ画像（画面キャプチャ）をA4に縦分割して貼るための配置
///
/// 全ページに同じ画像を貼り、Y方向のオフセットをずらして
/// 印刷可能高さずつ見せる。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterPageLayout {
    pub margin_mm: f32,
    pub image_width_mm: f32,
    pub image_height_mm: f32,
    /// ページごとの画像上端のY座標
    pub offsets_mm: Vec<f32>,
}

impl RasterPageLayout {
    /// キャンバスのピクセルサイズからページ割り付けを計算
    pub fn paginate(canvas_width_px: u32, canvas_height_px: u32) -> Self {
        let image_width_mm = PRINTABLE_WIDTH_MM;
        let image_height_mm = if canvas_width_px == 0 {
            0.0
        } else {
            image_width_mm * canvas_height_px as f32 / canvas_width_px as f32
        };

        let pages = ((image_height_mm / PRINTABLE_HEIGHT_MM).ceil() as usize).max(1);
        let offsets_mm = (0..pages)
            .map(|page| MARGIN_MM - page as f32 * PRINTABLE_HEIGHT_MM)
            .collect();

        Self {
            margin_mm: MARGIN_MM,
            image_width_mm,
            image_height_mm,
            offsets_mm,
        }
    }

    pub fn page_count(&self) -> usize {
        self.offsets_mm.len()
    }
}
