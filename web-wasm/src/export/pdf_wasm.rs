//! PDF生成（WASM版）
//!
//! 表示中の診断結果を画像化し、A4に縦分割して保存する

use crate::export::js_bindings::{capture_element_js, layout_to_json, save_raster_pdf_js};
use gloo::timers::future::TimeoutFuture;
use leaf_ai_common::RasterPageLayout;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement, HtmlElement};

/// 折りたたみを開いてから描画するまでの待ち時間
const EXPAND_DELAY_MS: u32 = 100;

/// 閉じている <details> を開き、開いたものを返す
fn expand_details(root: &Element) -> Vec<Element> {
    let mut opened = Vec::new();
    if let Ok(list) = root.query_selector_all("details:not([open])") {
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                let _ = el.set_attribute("open", "");
                opened.push(el);
            }
        }
    }
    opened
}

/// 要素IDの内容をPDFとしてダウンロード
pub async fn download_report(element_id: &str, file_name: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("document is not available")?;
    let element: HtmlElement = document
        .get_element_by_id(element_id)
        .ok_or_else(|| format!("element #{} not found", element_id))?
        .dyn_into()
        .map_err(|_| format!("element #{} is not an HTML element", element_id))?;

    let opened = expand_details(&element);
    if !opened.is_empty() {
        TimeoutFuture::new(EXPAND_DELAY_MS).await;
    }

    let captured = capture_element_js(&element).await;

    // 開いたものは元に戻す
    for el in &opened {
        let _ = el.remove_attribute("open");
    }

    let canvas_value = captured.map_err(|e| format!("Capture failed: {:?}", e))?;
    let canvas: HtmlCanvasElement = canvas_value
        .clone()
        .dyn_into()
        .map_err(|_| "capture did not return a canvas".to_string())?;

    let layout = RasterPageLayout::paginate(canvas.width(), canvas.height());
    log::info!(
        "exporting {} ({}x{} px, {} pages)",
        file_name,
        canvas.width(),
        canvas.height(),
        layout.page_count()
    );

    save_raster_pdf_js(&canvas_value, &layout_to_json(&layout)?, file_name)
        .map_err(|e| format!("PDF generation failed: {:?}", e))
}
