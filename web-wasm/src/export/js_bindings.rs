//! JavaScript Bridge バインディング
//!
//! 画面のラスタ化とPDF保存はJavaScript側（html2canvas / jsPDF）に委譲する。
//! ページ割り付けはRust側で計算して渡す。

use leaf_ai_common::RasterPageLayout;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/report-export.js")]
extern "C" {
    /// 要素をキャンバスに描画
    ///
    /// # Returns
    /// HTMLCanvasElement
    #[wasm_bindgen(js_name = "captureElement", catch)]
    pub async fn capture_element_js(element: &web_sys::HtmlElement) -> Result<JsValue, JsValue>;

    /// キャンバスをA4のPDFとして保存
    ///
    /// # Arguments
    /// * `canvas` - captureElementの戻り値
    /// * `layout_json` - RasterPageLayoutのJSON文字列
    /// * `file_name` - ダウンロード時のファイル名
    #[wasm_bindgen(js_name = "saveRasterPdf", catch)]
    pub fn save_raster_pdf_js(canvas: &JsValue, layout_json: &str, file_name: &str) -> Result<(), JsValue>;
}

/// RasterPageLayoutをJSON文字列に変換
pub fn layout_to_json(layout: &RasterPageLayout) -> Result<String, String> {
    serde_json::to_string(layout).map_err(|e| format!("JSON serialization failed: {}", e))
}
