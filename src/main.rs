use clap::Parser;
use leaf_ai::{cli, config, error, export, gemini, image_input, render};
use cli::{Cli, Commands, OutputFormat};
use config::Config;
use error::{LeafAiError, Result};
use leaf_ai_common::{DiagnosisOutcome, LeafDiagnoser, PredictionView};

const TEXT_WIDTH: usize = 80;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut config = Config::load()?;

    match cli.command {
        Commands::Diagnose { image, format, pdf } => {
            // --model は保存せずこの実行にだけ適用
            if let Some(model) = cli.model {
                config.model = model;
            }

            let photo = image_input::load_image(&image)?;
            let client = gemini::GeminiClient::from_config(&config)?;
            if !client.has_api_key() {
                log::warn!("APIキーが見つかりません (GOOGLE_API_KEY / GEMINI_API_KEY / 設定ファイル)");
            }
            log::info!("診断中: {} (model: {})", image.display(), client.model_name());

            let outcome = LeafDiagnoser::new(client).diagnose(&photo).await;

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }

            match outcome {
                DiagnosisOutcome::Success { prediction, diagnosis } => {
                    let view = PredictionView::new(&prediction, &diagnosis);
                    if format == OutputFormat::Text {
                        print!("{}", render::format_view(&view, TEXT_WIDTH));
                    }
                    if let Some(output) = pdf {
                        let path = export::write_pdf(&view, &output)?;
                        println!("✔ PDF出力: {}", path.display());
                    }
                }
                DiagnosisOutcome::Failure { error } => {
                    return Err(LeafAiError::Diagnosis(error));
                }
            }
        }

        Commands::Config { set_api_key, set_model, show } => {
            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(model) = set_model {
                config.set_model(model)?;
                println!("✔ モデルを設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  モデル: {}", config.model);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  APIキー: {}",
                    if config.resolve_api_key().is_some() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}
