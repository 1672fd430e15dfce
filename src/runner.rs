//! CLIの解析フロー
//!
//! Session の状態遷移をスピナー表示付きで実行し、結果を表示・保存する

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use plant_ai_common::{
    split_property, split_question_section, AnalysisRecord, QuestionSource, Session, TextGenerator,
};
use std::time::Duration;

use crate::error::{PlantAiError, Result};

/// スピナー（読み込み中表示）
fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 画像を解析する（失敗はSession側でログ済み、ここでは NoResult を返す）
pub async fn analyze<G>(session: &mut Session, generator: &G) -> Result<()>
where
    G: TextGenerator + ?Sized,
{
    let pb = spinner("AI解析中...");
    let produced = session.analyze(generator).await;
    pb.finish_and_clear();

    if produced {
        Ok(())
    } else {
        Err(PlantAiError::NoResult)
    }
}

/// 関連質問をたずねて結果を再生成する
pub async fn ask<G>(session: &mut Session, generator: &G, question: &str) -> Result<()>
where
    G: TextGenerator + ?Sized,
{
    let pb = spinner("質問中...");
    let produced = session.ask(generator, question).await;
    pb.finish_and_clear();

    if produced {
        Ok(())
    } else {
        Err(PlantAiError::NoResult)
    }
}

/// 解析結果を保存用レコードにする
pub fn build_record(session: &Session, file_name: &str) -> Option<AnalysisRecord> {
    let raw_text = session.result()?.to_string();

    Some(AnalysisRecord {
        file_name: file_name.to_string(),
        mime_type: session
            .image()
            .map(|img| img.mime_type.clone())
            .unwrap_or_default(),
        variant: session.pipeline().variant.as_str().to_string(),
        clean_text: session.clean_result().unwrap_or_default(),
        raw_text,
        fields: session.fields().clone(),
        analyzed_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}

/// 結果をターミナルに表示する
pub fn print_result(session: &Session) {
    let Some(clean) = session.clean_result() else {
        println!("（結果なし）");
        return;
    };

    // 関連質問は下の一覧で出すので本文からは外す
    let body = match session.pipeline().question_source {
        QuestionSource::Marker => split_question_section(&clean).0,
        _ => clean.as_str(),
    };
    println!("{}\n", body);

    let fields = session.fields();
    if !fields.properties.is_empty() {
        println!("■ プロパティ");
        for property in &fields.properties {
            match split_property(property) {
                Some((key, value)) => println!("  {}: {}", key, value),
                None => println!("  {}", property),
            }
        }
    }
    if !fields.keywords.is_empty() {
        println!("■ キーワード: {}", fields.keywords.join(", "));
    }
    if !fields.questions.is_empty() {
        println!("■ 関連質問");
        for (i, question) in fields.questions.iter().enumerate() {
            println!("  {}. {}", i + 1, question);
        }
    }
}

/// 関連質問を選ばせる。終了が選ばれたら None
pub fn select_question(questions: &[String]) -> Result<Option<String>> {
    if questions.is_empty() {
        return Ok(None);
    }

    let mut items: Vec<&str> = questions.iter().map(String::as_str).collect();
    items.push("終了");

    let selection = dialoguer::Select::new()
        .with_prompt("関連質問を選択")
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(|e| PlantAiError::Io(std::io::Error::other(e.to_string())))?;

    Ok(selection
        .filter(|&i| i < questions.len())
        .map(|i| questions[i].clone()))
}
