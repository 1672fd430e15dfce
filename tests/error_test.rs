//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use plant_ai::error::PlantAiError;
use plant_ai::loader;
use std::path::Path;
use tempfile::tempdir;

/// 存在しない画像を読み込んだ場合
#[test]
fn test_load_nonexistent_image() {
    let result = loader::load_image(Path::new("/nonexistent/path/12345.jpg"), 1568);
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, PlantAiError::FileNotFound(_)));
}

/// フォルダを指定した場合もファイルなしとして扱う
#[test]
fn test_load_directory_as_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = loader::load_image(dir.path(), 1568);
    assert!(matches!(result, Err(PlantAiError::FileNotFound(_))));
}

/// 画像以外の拡張子
#[test]
fn test_load_non_image_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{}").unwrap();

    let result = loader::load_image(&path, 1568);
    assert!(matches!(result, Err(PlantAiError::UnsupportedImage(_))));
}

/// PlantAiErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        PlantAiError::Config("テスト設定エラー".to_string()),
        PlantAiError::FileNotFound("leaf.jpg".to_string()),
        PlantAiError::UnsupportedImage("leaf.txt".to_string()),
        PlantAiError::ImageLoad("壊れた画像".to_string()),
        PlantAiError::ApiCall("API呼び出し失敗".to_string()),
        PlantAiError::NoResult,
        PlantAiError::PdfGeneration("PDF生成エラー".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let display = format!("{}", PlantAiError::MissingApiKey);

    assert!(display.contains("GEMINI_API_KEY"));
    assert!(display.contains("plant-ai config"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: PlantAiError = io_err.into();

    assert!(matches!(err, PlantAiError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: PlantAiError = json_err.into();

    assert!(matches!(err, PlantAiError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = plant_ai_common::Error::Api("status 503".to_string());
    let err: PlantAiError = common_err.into();

    assert!(matches!(err, PlantAiError::Common(_)));
    assert_eq!(format!("{}", err), "API error: status 503");
}
