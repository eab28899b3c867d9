//! LeafAI Common Library
//!
//! CLIとWeb(WASM)で共有される型・プロンプト・診断パイプライン

pub mod data_uri;
pub mod error;
pub mod gemini;
pub mod label;
pub mod layout;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod types;
pub mod upload;

pub use data_uri::ImageDataUri;
pub use error::{Error, ModelError, Result};
pub use label::{confidence_percent, format_disease_name, report_file_name, Condition};
pub use layout::RasterPageLayout;
pub use model::{run_prompt, GenerativeModel};
pub use parser::{extract_json, parse_json_response, parse_prompt_output};
pub use pipeline::{user_message, LeafDiagnoser};
pub use prompts::{Prompt, PromptKind, PromptRequest};
pub use report::{PredictionView, ReportSection};
pub use types::{Diagnosis, DiagnosisOutcome, DiagnosisPrediction, DiseaseReport, ReasoningResult};
pub use upload::{validate_file_type, UploadGate, UploadState};
