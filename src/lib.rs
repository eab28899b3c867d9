//! LeafAI CLI ライブラリ
//!
//! 診断パイプラインは leaf_ai_common にあり、ここでは設定・HTTPクライアント・出力を扱う。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod gemini;
pub mod image_input;
pub mod render;
