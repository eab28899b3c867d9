//! プロンプト定義モジュール
//!
//! CLIとWeb(WASM)で共有される3つのプロンプト:
//! - DiagnoseLeafInput: 葉の画像 → 病名ラベル + 確信度
//! - ReasonAboutPredictionInput: 画像 + 予測 → 確信度の根拠
//! - DiseaseReportInput: 病名 → 治療情報レポート
//!
//! 各プロンプトは入力型・出力型・応答スキーマ・テンプレートを持つ。

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::data_uri::ImageDataUri;
use crate::label;
use crate::types::{DiagnosisPrediction, DiseaseReport, ReasoningResult};

/// プロンプト種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    DiagnoseLeafDisease,
    ReasonAboutPrediction,
    GenerateDiseaseReport,
}

impl PromptKind {
    pub fn name(&self) -> &'static str {
        match self {
            PromptKind::DiagnoseLeafDisease => "diagnoseLeafDiseasePrompt",
            PromptKind::ReasonAboutPrediction => "reasonAboutPredictionPrompt",
            PromptKind::GenerateDiseaseReport => "generateDiseaseReportPrompt",
        }
    }
}

/// モデルへ送る1回分のリクエスト
#[derive(Debug, Clone)]
pub struct PromptRequest<'a> {
    pub kind: PromptKind,
    pub text: String,
    /// 添付画像（テキストのみのプロンプトではNone）
    pub image: Option<&'a ImageDataUri>,
    /// 応答JSONのスキーマ（Gemini responseSchema 形式）
    pub response_schema: Value,
}

/// 型付きプロンプト
pub trait Prompt {
    type Output: DeserializeOwned;

    const KIND: PromptKind;

    /// テンプレートに入力値を埋め込んだ本文
    fn render(&self) -> String;

    fn image(&self) -> Option<&ImageDataUri> {
        None
    }

    fn response_schema() -> Value;

    /// serdeで表現しきれない出力制約のチェック
    fn validate(_output: &Self::Output) -> Result<(), String> {
        Ok(())
    }

    fn to_request(&self) -> PromptRequest<'_> {
        PromptRequest {
            kind: Self::KIND,
            text: self.render(),
            image: self.image(),
            response_schema: Self::response_schema(),
        }
    }
}

/// Gemini responseSchema のオブジェクト定義を組み立てる
///
/// `fields` は (フィールド名, 型, 説明)
fn object_schema(fields: &[(&str, &str, &str)]) -> Value {
    let properties: serde_json::Map<String, Value> = fields
        .iter()
        .map(|(name, ty, description)| {
            (
                name.to_string(),
                json!({ "type": ty, "description": description }),
            )
        })
        .collect();
    let required: Vec<&str> = fields.iter().map(|(name, _, _)| *name).collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

// =============================================
// 診断プロンプト
// =============================================

/// 診断プロンプトの入力
#[derive(Debug, Clone, Copy)]
pub struct DiagnoseLeafInput<'a> {
    pub photo: &'a ImageDataUri,
}

impl Prompt for DiagnoseLeafInput<'_> {
    type Output = DiagnosisPrediction;

    const KIND: PromptKind = PromptKind::DiagnoseLeafDisease;

    fn render(&self) -> String {
        r#"You are a plant pathologist AI. Analyze the provided image of a plant leaf.

Your task is to:
1. Identify the plant species (e.g., Tomato, Potato, Apple).
2. Identify the disease affecting the leaf. If the leaf is healthy, identify it as "Healthy".
3. Format your output as a single string: "PlantName___DiseaseName". Replace spaces in the disease name with underscores. For example: "Tomato___Late_blight" or "Apple___Apple_scab" or "Potato___Healthy".
4. Provide a confidence score for your prediction. If you are very sure, provide a score close to 1.0. If you are uncertain, provide a lower score.

Respond with a JSON object: {"disease": "...", "confidence": 0.0}

Image to analyze: the attached image."#
            .to_string()
    }

    fn image(&self) -> Option<&ImageDataUri> {
        Some(self.photo)
    }

    fn response_schema() -> Value {
        object_schema(&[
            (
                "disease",
                "STRING",
                "The name of the disease in the format \"Plant___Disease_Name\". If the plant is healthy, it should be \"Plant___Healthy\".",
            ),
            (
                "confidence",
                "NUMBER",
                "The confidence level of the prediction (from 0 to 1).",
            ),
        ])
    }

    fn validate(output: &DiagnosisPrediction) -> Result<(), String> {
        if !label::is_well_formed_label(&output.disease) {
            return Err(format!(
                "disease label \"{}\" is not in Plant___Condition form",
                output.disease
            ));
        }
        if !(0.0..=1.0).contains(&output.confidence) {
            return Err(format!("confidence {} is outside [0, 1]", output.confidence));
        }
        Ok(())
    }
}

// =============================================
// 根拠プロンプト
// =============================================

/// 根拠プロンプトの入力
#[derive(Debug, Clone)]
pub struct ReasonAboutPredictionInput<'a> {
    pub photo: &'a ImageDataUri,
    pub disease_prediction: String,
    pub confidence_level: f64,
}

impl Prompt for ReasonAboutPredictionInput<'_> {
    type Output = ReasoningResult;

    const KIND: PromptKind = PromptKind::ReasonAboutPrediction;

    fn render(&self) -> String {
        let prediction = &self.disease_prediction;
        let confidence = self.confidence_level;

        format!(
            r#"You are an expert plant pathologist confirming a diagnosis. An AI model has predicted "{prediction}" with a confidence of {confidence}.

Your task is to:
1.  State whether the plant is healthy or has a disease based on the "{prediction}".
2.  Explain *why* this diagnosis is correct by analyzing the visual evidence in the attached image.
3.  Describe the specific symptoms (e.g., spots, discoloration, lesions) that are characteristic of "{prediction}".

Your explanation must directly support and be consistent with the initial prediction. Do not contradict the prediction.

Respond with a JSON object: {{"confidenceAssessment": "..."}}"#
        )
    }

    fn image(&self) -> Option<&ImageDataUri> {
        Some(self.photo)
    }

    fn response_schema() -> Value {
        object_schema(&[(
            "confidenceAssessment",
            "STRING",
            "An assessment of the confidence in the disease prediction.",
        )])
    }
}

// =============================================
// 病害レポートプロンプト
// =============================================

/// レポートプロンプトの入力（植物名除去・整形済みの病名）
#[derive(Debug, Clone)]
pub struct DiseaseReportInput {
    pub disease_name: String,
}

impl Prompt for DiseaseReportInput {
    type Output = DiseaseReport;

    const KIND: PromptKind = PromptKind::GenerateDiseaseReport;

    fn render(&self) -> String {
        format!(
            r#"You are an expert in plant diseases. Generate a report about the following disease, including common treatments:

Disease: {}

Respond with a JSON object: {{"report": "..."}}"#,
            self.disease_name
        )
    }

    fn response_schema() -> Value {
        object_schema(&[(
            "report",
            "STRING",
            "A report containing information about the disease and common treatments.",
        )])
    }
}
