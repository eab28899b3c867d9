//! 診断結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - DiagnosisPrediction: 診断プロンプトの出力
//! - ReasoningResult: 根拠プロンプトの出力
//! - DiseaseReport: レポートプロンプトの出力
//! - DiagnosisOutcome: パイプライン全体の最終出力

use serde::{Deserialize, Serialize};

use crate::label::{self, Condition};

/// 診断プロンプトの出力: 病名ラベルと確信度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisPrediction {
    /// `Plant___Condition` 形式のラベル（例: "Tomato___Late_blight"）
    pub disease: String,
    /// 0.0〜1.0
    pub confidence: f64,
}

impl DiagnosisPrediction {
    pub fn condition(&self) -> Condition {
        Condition::from_label(&self.disease)
    }

    pub fn is_healthy(&self) -> bool {
        label::is_healthy_label(&self.disease)
    }
}

/// 根拠プロンプトの出力
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasoningResult {
    pub confidence_assessment: String,
}

/// レポートプロンプトの出力
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseReport {
    pub report: String,
}

/// 診断の第2段階（根拠 + レポート）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub reasoning: String,
    pub report: String,
}

/// パイプラインの最終出力
///
/// JSON上は `{ prediction, diagnosis }` または `{ error }` のどちらか一方のみ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiagnosisOutcome {
    Success {
        prediction: DiagnosisPrediction,
        diagnosis: Diagnosis,
    },
    Failure {
        error: String,
    },
}

impl DiagnosisOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DiagnosisOutcome::Success { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DiagnosisOutcome::Failure { error } => Some(error),
            DiagnosisOutcome::Success { .. } => None,
        }
    }

    /// 成功時の (予測, 診断) を取り出す
    pub fn into_success(self) -> Option<(DiagnosisPrediction, Diagnosis)> {
        match self {
            DiagnosisOutcome::Success { prediction, diagnosis } => Some((prediction, diagnosis)),
            DiagnosisOutcome::Failure { .. } => None,
        }
    }
}
