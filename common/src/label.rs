//! 病名ラベルの整形
//!
//! ラベル形式: `PlantName___ConditionName`
//! - 条件名の空白はアンダースコアに置換されている
//! - 条件名 `Healthy` は健康を表す予約語

/// 植物名と条件名の区切り
pub const LABEL_SEPARATOR: &str = "___";

/// 健康判定に使う部分文字列
pub const HEALTHY_MARKER: &str = "___Healthy";

/// 健康時の表示名
pub const HEALTHY_DISPLAY_NAME: &str = "Healthy";

/// 健康/罹患の2状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Healthy,
    Diseased { name: String },
}

impl Condition {
    /// ラベルから状態を判定
    ///
    /// `Diseased` の `name` は [`format_disease_name`] 済みの表示名。
    pub fn from_label(label: &str) -> Self {
        if is_healthy_label(label) {
            Condition::Healthy
        } else {
            Condition::Diseased { name: format_disease_name(label) }
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Condition::Healthy)
    }

    /// 画面表示用の名前
    pub fn display_name(&self) -> &str {
        match self {
            Condition::Healthy => HEALTHY_DISPLAY_NAME,
            Condition::Diseased { name } => name,
        }
    }
}

pub fn is_healthy_label(label: &str) -> bool {
    label.contains(HEALTHY_MARKER)
}

/// 植物名の接頭辞を除去し、アンダースコアを空白に置換
///
/// 接頭辞は「先頭から `_` を含まない1文字以上 + `___`」に一致する部分のみ。
///
/// ```
/// use leaf_ai_common::format_disease_name;
///
/// assert_eq!(format_disease_name("Tomato___Late_blight"), "Late blight");
/// assert_eq!(format_disease_name("Apple___Apple_scab"), "Apple scab");
/// ```
pub fn format_disease_name(label: &str) -> String {
    strip_plant_prefix(label).replace('_', " ")
}

fn strip_plant_prefix(label: &str) -> &str {
    match label.find('_') {
        Some(idx) if idx > 0 && label[idx..].starts_with(LABEL_SEPARATOR) => {
            &label[idx + LABEL_SEPARATOR.len()..]
        }
        _ => label,
    }
}

/// ラベルの文法チェック（植物名と条件名がどちらも空でないこと）
pub fn is_well_formed_label(label: &str) -> bool {
    match label.split_once(LABEL_SEPARATOR) {
        Some((plant, condition)) => !plant.trim().is_empty() && !condition.trim().is_empty(),
        None => false,
    }
}

/// 確信度をパーセント表示用に丸める
pub fn confidence_percent(confidence: f64) -> u32 {
    (confidence * 100.0).round() as u32
}

/// PDFのファイル名
pub fn report_file_name(label: &str) -> String {
    format!("LeafAI_Report_{}.pdf", label.replace(LABEL_SEPARATOR, "_"))
}
