//! CLIのエラー型

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlantAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。環境変数 GEMINI_API_KEY を設定するか `plant-ai config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していない画像形式です: {0}")]
    UnsupportedImage(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("解析結果が得られませんでした")]
    NoResult,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error(transparent)]
    Common(#[from] plant_ai_common::Error),
}

pub type Result<T> = std::result::Result<T, PlantAiError>;
