//! 画像エンコード
//!
//! 画像バイナリ / Data URL を送信用の ImageData（Base64 + MIMEタイプ）に変換する

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Error, Result};
use crate::types::ImageData;

/// MIMEタイプが判別できない場合の既定値
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// 拡張子とMIMEタイプの対応
const MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
];

impl ImageData {
    /// バイナリをBase64エンコードしてImageDataを作る
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URLからImageDataを作る
    pub fn from_data_url(data_url: &str) -> Result<Self> {
        if !data_url.starts_with("data:") {
            return Err(Error::Encoding("Data URLではありません".into()));
        }
        let data = extract_base64_from_data_url(data_url)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| Error::Encoding("Data URLにデータ部がありません".into()))?;

        Ok(Self {
            mime_type: extract_mime_type_from_data_url(data_url).to_string(),
            data: data.to_string(),
        })
    }

    /// Base64をデコードしてバイナリに戻す
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| Error::Encoding(format!("Base64デコード失敗: {}", e)))
    }
}

/// Data URLからBase64データ部分を抽出
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split(',').nth(1)
}

/// Data URLからMIMEタイプを抽出（失敗時は image/jpeg）
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .split(':')
        .nth(1)
        .and_then(|s| s.split(';').next())
        .filter(|s| !s.is_empty() && s.contains('/'))
        .unwrap_or(DEFAULT_MIME_TYPE)
}

/// 拡張子からMIMEタイプを判定（大文字小文字は区別しない）
pub fn mime_type_from_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}
