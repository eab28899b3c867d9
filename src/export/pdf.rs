use crate::error::{LeafAiError, Result};
use crate::render::wrap_text;
use leaf_ai_common::layout::{A4_HEIGHT_MM, A4_WIDTH_MM, MARGIN_MM, PRINTABLE_HEIGHT_MM};
use leaf_ai_common::report::DISCLAIMER;
use leaf_ai_common::PredictionView;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

const WRAP_COLUMNS: usize = 95;

/// PDFの1行
#[derive(Debug, Clone, PartialEq)]
pub enum PdfLine {
    Title(String),
    Heading(String),
    Body(String),
    Note(String),
    Blank,
}

impl PdfLine {
    fn height_mm(&self) -> f32 {
        match self {
            PdfLine::Title(_) => 10.0,
            PdfLine::Heading(_) => 8.0,
            PdfLine::Body(_) | PdfLine::Note(_) => 5.0,
            PdfLine::Blank => 3.0,
        }
    }
}

/// 表示モデルからPDFの行を組み立てる
pub fn build_lines(view: &PredictionView, generated_at: &str) -> Vec<PdfLine> {
    let mut lines = vec![
        PdfLine::Title("LeafAI Diagnosis Report".to_string()),
        PdfLine::Note(format!("Generated: {}", generated_at)),
        PdfLine::Blank,
    ];

    for section in view.sections() {
        lines.push(PdfLine::Heading(section.heading.to_string()));
        lines.extend(
            wrap_text(&to_pdf_text(&section.body), WRAP_COLUMNS)
                .into_iter()
                .map(PdfLine::Body),
        );
        lines.push(PdfLine::Blank);
    }

    lines.extend(
        wrap_text(DISCLAIMER, WRAP_COLUMNS)
            .into_iter()
            .map(PdfLine::Note),
    );
    lines
}

/// 印刷可能高さごとにページへ分割
pub fn paginate(lines: &[PdfLine]) -> Vec<&[PdfLine]> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut used = 0.0;

    for (i, line) in lines.iter().enumerate() {
        let height = line.height_mm();
        if used + height > PRINTABLE_HEIGHT_MM && i > start {
            pages.push(&lines[start..i]);
            start = i;
            used = 0.0;
        }
        used += height;
    }

    if start < lines.len() || pages.is_empty() {
        pages.push(&lines[start..]);
    }
    pages
}

/// 標準フォント(WinAnsi)で表示できない文字を置換
fn to_pdf_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2022}' => '*',
            '\t' => ' ',
            c if c.is_ascii() => c,
            c if ('\u{00A0}'..='\u{00FF}').contains(&c) => c,
            _ => '?',
        })
        .collect()
}

/// PDFを生成してバイト列を返す
pub fn render_pdf(view: &PredictionView, generated_at: &str) -> Result<Vec<u8>> {
    let lines = build_lines(view, generated_at);
    let pages = paginate(&lines);

    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("LeafAI Report - {}", view.title),
        Mm(A4_WIDTH_MM),
        Mm(A4_HEIGHT_MM),
        "Layer 1",
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| LeafAiError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| LeafAiError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;

    for (page_idx, page_lines) in pages.iter().enumerate() {
        let layer = if page_idx == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        let mut y = A4_HEIGHT_MM - MARGIN_MM;
        for line in page_lines.iter() {
            y -= line.height_mm();
            let (text, size, font): (&str, f32, &IndirectFontRef) = match line {
                PdfLine::Title(t) => (t.as_str(), 18.0, &bold),
                PdfLine::Heading(t) => (t.as_str(), 13.0, &bold),
                PdfLine::Body(t) => (t.as_str(), 10.0, &regular),
                PdfLine::Note(t) => (t.as_str(), 8.0, &regular),
                PdfLine::Blank => continue,
            };
            layer.use_text(text, size, Mm(MARGIN_MM), Mm(y), font);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| LeafAiError::PdfGeneration(format!("PDF保存エラー: {:?}", e)))
}
