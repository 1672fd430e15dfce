//! Gemini API のリクエスト/レスポンス型
//!
//! 送信処理はCLI（reqwest）とWeb（fetch）で別実装、ここは共通のワイヤ形式のみ

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::GenerationRequest;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// generateContent のURL（APIキーはクエリで渡す）
pub fn endpoint(model: &str, api_key: &str) -> String {
    format!("{}/{}:generateContent?key={}", GEMINI_API_BASE, model, api_key)
}

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

impl GeminiRequest {
    /// プロンプト + 画像（あれば）から1ターンのリクエストを組み立てる
    pub fn from_generation(request: &GenerationRequest, temperature: f32) -> Self {
        let mut parts = vec![Part::Text {
            text: request.prompt.clone(),
        }];

        if let Some(image) = &request.image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            });
        }

        Self {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature,
                response_mime_type: Some("text/plain".to_string()),
            },
        }
    }
}

/// Gemini APIレスポンス
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback", default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
    #[serde(rename = "finishReason", default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromptFeedback {
    #[serde(rename = "blockReason", default)]
    pub block_reason: Option<String>,
}

impl GeminiResponse {
    /// 先頭候補のテキストパートを連結して返す
    pub fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(Error::Api(format!("Prompt blocked: {}", reason)));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::Api("Empty response".into()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".into());
            return Err(Error::Api(format!("Empty response (finishReason: {})", reason)));
        }

        Ok(text)
    }
}

/// レスポンスJSON文字列をパースしてテキストを取り出す
pub fn parse_response(body: &str) -> Result<String> {
    let response: GeminiResponse = serde_json::from_str(body)?;
    response.into_text()
}
