//! 診断結果の表示モデル
//!
//! Web画面・端末出力・PDFが同じ見出しと本文を使うための中間表現。

use serde::Serialize;

use crate::label::{confidence_percent, report_file_name, Condition};
use crate::types::{Diagnosis, DiagnosisPrediction};

pub const PREDICTION_HEADING: &str = "AI Prediction";
pub const ANALYSIS_HEADING: &str = "AI Analysis";
pub const ANALYSIS_DESCRIPTION: &str = "An assessment of the prediction's confidence.";
pub const REPORT_HEADING: &str = "Disease Report";
pub const REPORT_DESCRIPTION: &str = "Information and treatment suggestions.";

/// 免責文
pub const DISCLAIMER: &str =
    "LeafAI is for educational purposes only. For critical applications, please consult a professional.";

/// 表示用の1セクション
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub heading: &'static str,
    pub body: String,
}

/// 診断結果の表示モデル
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionView {
    /// 元のラベル（"Tomato___Late_blight"）
    pub label: String,
    /// 表示名（"Late blight" / "Healthy"）
    pub title: String,
    pub healthy: bool,
    pub confidence: f64,
    pub confidence_percent: u32,
    pub reasoning: String,
    /// 健康時はNone
    pub report: Option<String>,
    pub file_name: String,
}

impl PredictionView {
    pub fn new(prediction: &DiagnosisPrediction, diagnosis: &Diagnosis) -> Self {
        let condition = prediction.condition();
        let report = match condition {
            Condition::Healthy => None,
            Condition::Diseased { .. } => Some(diagnosis.report.clone()),
        };

        Self {
            label: prediction.disease.clone(),
            title: condition.display_name().to_string(),
            healthy: condition.is_healthy(),
            confidence: prediction.confidence,
            confidence_percent: confidence_percent(prediction.confidence),
            reasoning: diagnosis.reasoning.clone(),
            report,
            file_name: report_file_name(&prediction.disease),
        }
    }

    pub fn confidence_text(&self) -> String {
        format!("{}%", self.confidence_percent)
    }

    /// 表示順のセクション一覧
    pub fn sections(&self) -> Vec<ReportSection> {
        let mut sections = vec![
            ReportSection {
                heading: PREDICTION_HEADING,
                body: format!("{}\nConfidence: {}", self.title, self.confidence_text()),
            },
            ReportSection {
                heading: ANALYSIS_HEADING,
                body: self.reasoning.clone(),
            },
        ];

        if let Some(report) = &self.report {
            sections.push(ReportSection {
                heading: REPORT_HEADING,
                body: report.clone(),
            });
        }

        sections
    }
}
