//! 端末への診断結果表示

use leaf_ai_common::report::DISCLAIMER;
use leaf_ai_common::PredictionView;

/// 単語単位で折り返す（1単語が幅を超える場合はそのまま1行）
///
/// 幅はバイト数ではなく文字数で数える
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.chars().count();
            let needed = if current.is_empty() { word_width } else { current_width + 1 + word_width };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
        lines.push(current);
    }

    lines
}

/// 表示モデルを端末用テキストに整形
pub fn format_view(view: &PredictionView, width: usize) -> String {
    let mut out = String::new();
    let rule = "─".repeat(width.min(60));

    for section in view.sections() {
        out.push_str(&format!("■ {}\n", section.heading));
        for line in wrap_text(&section.body, width) {
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str(&rule);
    out.push('\n');
    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}
