//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ImageData: 送信用にエンコードした画像
//! - GenerationRequest: AI呼び出し1回分の入力
//! - ExtractedFields: 応答テキストから抽出したフィールド
//! - AnalysisRecord: CLIが保存するJSON

use serde::{Deserialize, Serialize};

/// Base64エンコード済みの画像
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub mime_type: String,
    /// Base64（標準アルファベット、パディングあり）
    pub data: String,
}

/// AI呼び出し1回分のリクエスト（プロンプト + 任意の画像）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub image: Option<ImageData>,
}

impl GenerationRequest {
    /// テキストのみのリクエスト
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    /// 画像付きリクエスト
    pub fn with_image(prompt: impl Into<String>, image: ImageData) -> Self {
        Self {
            prompt: prompt.into(),
            image: Some(image),
        }
    }
}

/// 応答テキストから抽出したフィールド
///
/// 毎回の解析結果から再計算される派生値で、何も見つからなければ空のまま
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedFields {
    pub properties: Vec<String>,
    pub keywords: Vec<String>,
    pub questions: Vec<String>,
}

impl ExtractedFields {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.keywords.is_empty() && self.questions.is_empty()
    }
}

/// 保存用の解析レコード
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub file_name: String,

    #[serde(default)]
    pub mime_type: String,

    #[serde(default)]
    pub variant: String,

    /// AIが返した生テキスト
    pub raw_text: String,

    /// normalize済みテキスト
    #[serde(default)]
    pub clean_text: String,

    #[serde(default)]
    pub fields: ExtractedFields,

    /// 解析日時（ローカル時刻）
    #[serde(default)]
    pub analyzed_at: String,
}
