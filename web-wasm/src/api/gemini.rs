//! Gemini API連携（fetch）

use async_trait::async_trait;
use plant_ai_common::gemini::{endpoint, GeminiRequest, GeminiResponse, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use plant_ai_common::{Error, GenerationRequest, Result, TextGenerator};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// ビルド時に環境変数で渡されたAPIキー（未設定なら空）
pub fn build_time_api_key() -> &'static str {
    option_env!("GEMINI_API_KEY").unwrap_or("")
}

pub struct GeminiClient {
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    async fn call(&self, request: &GenerationRequest) -> std::result::Result<String, JsValue> {
        let body = serde_json::to_string(&GeminiRequest::from_generation(request, DEFAULT_TEMPERATURE))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let url = endpoint(&self.model, &self.api_key);
        let request = Request::new_with_str_and_init(&url, &opts)?;
        request.headers().set("Content-Type", "application/json")?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        if !resp.ok() {
            let text = JsFuture::from(resp.text()?).await?.as_string().unwrap_or_default();
            return Err(JsValue::from_str(&status_message(resp.status(), &text)));
        }

        let json = JsFuture::from(resp.json()?).await?;
        let response: GeminiResponse = serde_wasm_bindgen::from_value(json)?;

        response.into_text().map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[async_trait(?Send)]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.call(request).await.map_err(js_error)
    }
}

/// JsValue のエラーを共通エラーに変換
fn js_error(value: JsValue) -> Error {
    let message = value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Api(message)
}

/// HTTPエラー時のメッセージ（本文は長すぎる場合に切り詰める）
fn status_message(status: u16, body: &str) -> String {
    const MAX_BODY_CHARS: usize = 200;
    let body = body.trim();
    if body.is_empty() {
        return format!("API error: {}", status);
    }
    let snippet: String = body.chars().take(MAX_BODY_CHARS).collect();
    format!("API error: {} {}", status, snippet)
}
