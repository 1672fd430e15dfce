use clap::Parser;
use plant_ai::{cli, config, error, export, gemini, loader, logging, runner};
use plant_ai_common::{AnalysisRecord, Pipeline, Session, TextPdfLayout};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, variant, questions, prompt, output, pdf, normalized, interactive } => {
            println!("🌿 plant-ai - 植物写真解析\n");

            let mut pipeline = Pipeline::preset(variant.unwrap_or(config.default_variant));
            if let Some(source) = questions {
                pipeline = pipeline.with_question_source(source);
            }
            if let Some(prompt) = prompt {
                pipeline = pipeline.with_prompt(prompt);
            }

            let client = gemini::GeminiClient::from_config(&config)?;

            // 1. 画像読み込み
            println!("[1/2] 画像を読み込み中...");
            let loaded = loader::load_image(&image, config.max_image_size)?;
            println!(
                "✔ {} ({}{})\n",
                loaded.file_name,
                loaded.image.mime_type,
                if loaded.resized { ", 縮小済み" } else { "" }
            );

            let mut session = Session::new(pipeline);
            session.set_image(loaded.image);

            // 2. AI解析
            println!("[2/2] AI解析中... ({})", client.model());
            runner::analyze(&mut session, &client).await?;
            println!("✔ 解析完了\n");
            runner::print_result(&session);

            if interactive {
                while let Some(question) = runner::select_question(&session.fields().questions)? {
                    println!("\n❓ {}\n", question);
                    if let Err(e) = runner::ask(&mut session, &client, &question).await {
                        // 前の結果は残っているので、そのまま続ける
                        println!("✖ {}", e);
                        continue;
                    }
                    runner::print_result(&session);
                }
            }

            let record = runner::build_record(&session, &loaded.file_name)
                .ok_or(error::PlantAiError::NoResult)?;
            save_outputs(&record, output.as_deref(), pdf.as_deref(), normalized)?;

            println!("\n✅ 完了");
        }

        Commands::Ask { image, question, pdf } => {
            println!("🌿 plant-ai - 質問\n");

            let client = gemini::GeminiClient::from_config(&config)?;
            let loaded = loader::load_image(&image, config.max_image_size)?;

            let mut session = Session::new(Pipeline::preset(config.default_variant));
            session.set_image(loaded.image);

            println!("❓ {}\n", question);
            runner::ask(&mut session, &client, &question).await?;
            runner::print_result(&session);

            let record = runner::build_record(&session, &loaded.file_name)
                .ok_or(error::PlantAiError::NoResult)?;
            save_outputs(&record, None, pdf.as_deref(), false)?;
        }

        Commands::Export { input, output, title, normalized } => {
            println!("📄 plant-ai - エクスポート\n");

            let content = std::fs::read_to_string(&input)?;
            let record: AnalysisRecord = serde_json::from_str(&content)?;

            let output = output.unwrap_or_else(|| {
                input.parent().unwrap_or(Path::new(".")).to_path_buf()
            });
            let title = title.unwrap_or_else(|| record.file_name.clone());

            export::export_record(&record, &output, &title, normalized)?;

            println!("\n✅ エクスポート完了");
        }

        Commands::Config { set_api_key, set_model, show } => {
            let mut config = config;

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
                println!("  モデル: {}", config.model);
                println!("  temperature: {}", config.temperature);
                println!("  最大画像サイズ: {}px", config.max_image_size);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  既定バリアント: {}", config.default_variant.as_str());
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}

fn save_outputs(
    record: &AnalysisRecord,
    json_output: Option<&Path>,
    pdf_output: Option<&Path>,
    normalized: bool,
) -> Result<()> {
    if let Some(path) = json_output {
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(path, json)?;
        println!("✔ 結果を保存: {}", path.display());
    }

    if let Some(path) = pdf_output {
        let output_path = export::pdf_output_path(path, &record.file_name);
        let text = export::export_text(record, normalized);
        export::pdf::generate_pdf(&text, &record.file_name, &output_path, &TextPdfLayout::a4())?;
        println!("✔ PDF出力: {}", output_path.display());
    }

    Ok(())
}
