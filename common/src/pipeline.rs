//! 診断パイプライン
//!
//! 診断 → (健康なら根拠のみ / 罹患なら根拠とレポートを並行) → 結果組み立て
//!
//! モデル呼び出しの失敗はすべてここで捕捉し、利用者向けメッセージに変換する。
//! リトライ・キャッシュは行わない。

use crate::data_uri::ImageDataUri;
use crate::error::ModelError;
use crate::label::{Condition, HEALTHY_DISPLAY_NAME};
use crate::model::{run_prompt, GenerativeModel};
use crate::prompts::{DiagnoseLeafInput, DiseaseReportInput, ReasonAboutPredictionInput};
use crate::types::{Diagnosis, DiagnosisOutcome, DiagnosisPrediction};

/// 健康時に固定で返すレポート
pub const HEALTHY_REPORT: &str =
    "The plant appears to be healthy. No disease report is necessary. Continue to monitor for any changes.";

/// APIキー欠落・不正時のメッセージ
pub const CREDENTIAL_ERROR_MESSAGE: &str =
    "Failed to analyze image. The GOOGLE_API_KEY is missing or invalid. Please add it to your environment variables.";

/// ブラウザでAPIキー欄に入力されたキーが欠落・不正な時のメッセージ
pub const KEY_FIELD_CREDENTIAL_ERROR_MESSAGE: &str =
    "Failed to analyze image. The Gemini API key is missing or invalid. Please enter a valid key in the API key field.";

/// その他のモデル・通信エラー時のメッセージ
pub const GENERIC_ERROR_MESSAGE: &str =
    "An error occurred while analyzing the image. The AI model may be unavailable or experienced an issue. Please try again later.";

/// 画像ファイルを読み込めなかった時のメッセージ
pub const FILE_READ_ERROR_MESSAGE: &str = "Failed to read the image file.";

/// エラーを利用者向けメッセージへ変換
pub fn user_message(error: &ModelError) -> &'static str {
    if error.is_credential_error() {
        CREDENTIAL_ERROR_MESSAGE
    } else {
        GENERIC_ERROR_MESSAGE
    }
}

/// 葉の病害診断器
///
/// モデル（APIキーを含む）は構築時に受け取る。
pub struct LeafDiagnoser<M> {
    model: M,
    credential_message: &'static str,
}

impl<M: GenerativeModel> LeafDiagnoser<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            credential_message: CREDENTIAL_ERROR_MESSAGE,
        }
    }

    /// APIキーの入手元に合わせて資格情報エラーの文言を差し替える
    pub fn with_credential_message(mut self, message: &'static str) -> Self {
        self.credential_message = message;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// 診断を実行し、成功/エラーのどちらか一方を返す
    pub async fn diagnose(&self, photo: &ImageDataUri) -> DiagnosisOutcome {
        match self.try_diagnose(photo).await {
            Ok((prediction, diagnosis)) => DiagnosisOutcome::Success { prediction, diagnosis },
            Err(e) => {
                log::error!("Error getting AI diagnosis: {}", e);
                let message = if e.is_credential_error() {
                    self.credential_message
                } else {
                    user_message(&e)
                };
                DiagnosisOutcome::Failure {
                    error: message.to_string(),
                }
            }
        }
    }

    /// 診断を実行し、失敗時は型付きエラーを返す
    pub async fn try_diagnose(
        &self,
        photo: &ImageDataUri,
    ) -> Result<(DiagnosisPrediction, Diagnosis), ModelError> {
        let prediction = run_prompt(&self.model, &DiagnoseLeafInput { photo }).await?;
        log::info!(
            "prediction: {} (confidence {})",
            prediction.disease,
            prediction.confidence
        );

        let diagnosis = match prediction.condition() {
            Condition::Healthy => {
                let reasoning = run_prompt(
                    &self.model,
                    &ReasonAboutPredictionInput {
                        photo,
                        disease_prediction: HEALTHY_DISPLAY_NAME.to_string(),
                        confidence_level: prediction.confidence,
                    },
                )
                .await?;

                Diagnosis {
                    reasoning: reasoning.confidence_assessment,
                    report: HEALTHY_REPORT.to_string(),
                }
            }
            Condition::Diseased { name } => {
                let reason_input = ReasonAboutPredictionInput {
                    photo,
                    disease_prediction: name.clone(),
                    confidence_level: prediction.confidence,
                };
                let report_input = DiseaseReportInput { disease_name: name };

                // 両方の完了を待ち、どちらかが失敗したら全体を失敗にする
                let (reasoning, report) = futures::try_join!(
                    run_prompt(&self.model, &reason_input),
                    run_prompt(&self.model, &report_input)
                )?;

                Diagnosis {
                    reasoning: reasoning.confidence_assessment,
                    report: report.report,
                }
            }
        };

        Ok((prediction, diagnosis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::{PromptKind, PromptRequest};
    use futures::executor::block_on;
    use std::sync::Mutex;

    /// プロンプト種別ごとに応答を返すモック
    struct ScriptedModel {
        diagnosis: Result<String, ModelError>,
        reasoning: Result<String, ModelError>,
        report: Result<String, ModelError>,
        calls: Mutex<Vec<(PromptKind, String)>>,
    }

    impl ScriptedModel {
        fn new(disease: &str, confidence: f64) -> Self {
            Self {
                diagnosis: Ok(format!(r#"{{"disease": "{}", "confidence": {}}}"#, disease, confidence)),
                reasoning: Ok(r#"{"confidenceAssessment": "Lesions match."}"#.to_string()),
                report: Ok(r#"{"report": "Use fungicide."}"#.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(PromptKind, String)> {
            self.calls.lock().unwrap().clone()
        }

        fn count(&self, kind: PromptKind) -> usize {
            self.calls().iter().filter(|(k, _)| *k == kind).count()
        }
    }

    impl GenerativeModel for ScriptedModel {
        async fn generate(&self, request: &PromptRequest<'_>) -> Result<String, ModelError> {
            self.calls.lock().unwrap().push((request.kind, request.text.clone()));
            match request.kind {
                PromptKind::DiagnoseLeafDisease => self.diagnosis.clone(),
                PromptKind::ReasonAboutPrediction => self.reasoning.clone(),
                PromptKind::GenerateDiseaseReport => self.report.clone(),
            }
        }
    }

    fn photo() -> ImageDataUri {
        ImageDataUri::parse("data:image/jpeg;base64,/9j/4AAQ").unwrap()
    }

    #[test]
    fn test_healthy_skips_report() {
        let diagnoser = LeafDiagnoser::new(ScriptedModel::new("Potato___Healthy", 0.97));
        let outcome = block_on(diagnoser.diagnose(&photo()));

        let (prediction, diagnosis) = outcome.into_success().expect("成功のはず");
        assert_eq!(prediction.disease, "Potato___Healthy");
        assert_eq!(diagnosis.report, HEALTHY_REPORT);
        assert_eq!(diagnosis.reasoning, "Lesions match.");

        let model = diagnoser.model();
        assert_eq!(model.count(PromptKind::GenerateDiseaseReport), 0);
        assert_eq!(model.count(PromptKind::ReasonAboutPrediction), 1);
        // 根拠プロンプトには "Healthy" を渡す
        let (_, text) = &model.calls()[1];
        assert!(text.contains("has predicted \"Healthy\""));
    }

    #[test]
    fn test_diseased_runs_reasoning_and_report() {
        let diagnoser = LeafDiagnoser::new(ScriptedModel::new("Tomato___Late_blight", 0.88));
        let outcome = block_on(diagnoser.diagnose(&photo()));

        let (prediction, diagnosis) = outcome.into_success().expect("成功のはず");
        assert!((prediction.confidence - 0.88).abs() < f64::EPSILON);
        assert_eq!(diagnosis.reasoning, "Lesions match.");
        assert_eq!(diagnosis.report, "Use fungicide.");

        let model = diagnoser.model();
        assert_eq!(model.count(PromptKind::DiagnoseLeafDisease), 1);
        assert_eq!(model.count(PromptKind::ReasonAboutPrediction), 1);
        assert_eq!(model.count(PromptKind::GenerateDiseaseReport), 1);

        // 整形済みの病名が両方に渡る
        for (kind, text) in model.calls().iter().skip(1) {
            assert!(text.contains("Late blight"), "{:?} に整形済み病名がない", kind);
            assert!(!text.contains("Tomato___"));
        }
    }

    #[test]
    fn test_missing_api_key_stops_pipeline() {
        let mut model = ScriptedModel::new("Tomato___Late_blight", 0.9);
        model.diagnosis = Err(ModelError::MissingApiKey);
        let diagnoser = LeafDiagnoser::new(model);

        let outcome = block_on(diagnoser.diagnose(&photo()));
        assert_eq!(outcome.error(), Some(CREDENTIAL_ERROR_MESSAGE));
        assert_eq!(diagnoser.model().calls().len(), 1);
    }

    #[test]
    fn test_credential_message_can_be_replaced() {
        let mut model = ScriptedModel::new("Tomato___Late_blight", 0.9);
        model.diagnosis = Err(ModelError::MissingApiKey);
        let diagnoser =
            LeafDiagnoser::new(model).with_credential_message(KEY_FIELD_CREDENTIAL_ERROR_MESSAGE);

        let outcome = block_on(diagnoser.diagnose(&photo()));
        assert_eq!(outcome.error(), Some(KEY_FIELD_CREDENTIAL_ERROR_MESSAGE));
        assert!(!KEY_FIELD_CREDENTIAL_ERROR_MESSAGE.contains("environment variables"));

        // 資格情報以外のエラーは汎用メッセージのまま
        let mut model = ScriptedModel::new("Tomato___Late_blight", 0.9);
        model.report = Err(ModelError::EmptyResponse);
        let diagnoser =
            LeafDiagnoser::new(model).with_credential_message(KEY_FIELD_CREDENTIAL_ERROR_MESSAGE);
        let outcome = block_on(diagnoser.diagnose(&photo()));
        assert_eq!(outcome.error(), Some(GENERIC_ERROR_MESSAGE));
    }

    #[test]
    fn test_unrelated_error_gives_generic_message() {
        let mut model = ScriptedModel::new("Tomato___Late_blight", 0.9);
        model.diagnosis = Err(ModelError::Transport("timeout".to_string()));
        let diagnoser = LeafDiagnoser::new(model);

        let outcome = block_on(diagnoser.diagnose(&photo()));
        assert_eq!(outcome.error(), Some(GENERIC_ERROR_MESSAGE));
        assert_eq!(diagnoser.model().calls().len(), 1);
    }

    #[test]
    fn test_reasoning_failure_fails_whole_outcome() {
        let mut model = ScriptedModel::new("Tomato___Late_blight", 0.9);
        model.reasoning = Err(ModelError::Http { status: 503, message: "unavailable".into() });
        let diagnoser = LeafDiagnoser::new(model);

        let outcome = block_on(diagnoser.diagnose(&photo()));
        assert!(!outcome.is_success());
        assert_eq!(outcome.error(), Some(GENERIC_ERROR_MESSAGE));
    }

    #[test]
    fn test_malformed_diagnosis_is_generic_error() {
        let mut model = ScriptedModel::new("Tomato___Late_blight", 0.9);
        model.diagnosis = Ok("I think it is blight.".to_string());
        let diagnoser = LeafDiagnoser::new(model);

        let err = block_on(diagnoser.try_diagnose(&photo())).unwrap_err();
        assert!(matches!(err, ModelError::Schema { .. }));
        assert_eq!(user_message(&err), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_user_message() {
        assert_eq!(user_message(&ModelError::MissingApiKey), CREDENTIAL_ERROR_MESSAGE);
        assert_eq!(
            user_message(&ModelError::InvalidApiKey("bad".into())),
            CREDENTIAL_ERROR_MESSAGE
        );
        assert_eq!(user_message(&ModelError::EmptyResponse), GENERIC_ERROR_MESSAGE);
    }
}
