//! PDFエクスポートテスト

use leaf_ai::export::{pdf, write_pdf};
use leaf_ai_common::pipeline::HEALTHY_REPORT;
use leaf_ai_common::{Diagnosis, DiagnosisPrediction, PredictionView};
use tempfile::tempdir;

fn diseased_view() -> PredictionView {
    PredictionView::new(
        &DiagnosisPrediction { disease: "Apple___Apple_scab".into(), confidence: 0.87 },
        &Diagnosis {
            reasoning: "Olive-green velvety lesions on the upper leaf surface.".into(),
            report: "Apple scab is a fungal disease.\n\nRake and destroy fallen leaves.".into(),
        },
    )
}

#[test]
fn test_write_pdf_into_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_pdf(&diseased_view(), dir.path()).expect("PDF生成失敗");

    assert_eq!(path, dir.path().join("LeafAI_Report_Apple_Apple_scab.pdf"));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_write_pdf_to_explicit_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let target = dir.path().join("reports").join("scab.pdf");
    let path = write_pdf(&diseased_view(), &target).expect("PDF生成失敗");

    assert_eq!(path, target);
    assert!(target.exists());
}

#[test]
fn test_healthy_pdf_omits_report_section() {
    let view = PredictionView::new(
        &DiagnosisPrediction { disease: "Potato___Healthy".into(), confidence: 0.99 },
        &Diagnosis { reasoning: "Uniform green color.".into(), report: HEALTHY_REPORT.into() },
    );
    let lines = pdf::build_lines(&view, "2026-01-01 09:00");

    assert!(!lines.contains(&pdf::PdfLine::Heading("Disease Report".into())));
    assert!(pdf::render_pdf(&view, "2026-01-01 09:00").unwrap().starts_with(b"%PDF"));
}
