pub mod pdf;

use crate::error::Result;
use leaf_ai_common::PredictionView;
use std::path::{Path, PathBuf};

/// 出力先がディレクトリ（または拡張子なし）ならレポート名を付与
pub fn output_path_for_report(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

/// PDFレポートを書き出し、書き出したパスを返す
pub fn write_pdf(view: &PredictionView, output: &Path) -> Result<PathBuf> {
    let path = output_path_for_report(output, &view.file_name);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
    let bytes = pdf::render_pdf(view, &generated_at)?;
    std::fs::write(&path, bytes)?;

    log::info!("PDF出力: {}", path.display());
    Ok(path)
}
