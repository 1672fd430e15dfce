//! Gemini API クライアント（reqwest）

use async_trait::async_trait;
use plant_ai_common::gemini::{endpoint, parse_response, GeminiRequest};
use plant_ai_common::{Error as CommonError, GenerationRequest, TextGenerator};
use std::time::Duration;

use crate::config::Config;
use crate::error::{PlantAiError, Result};

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlantAiError::ApiCall(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            temperature: plant_ai_common::gemini::DEFAULT_TEMPERATURE,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;
        let client = Self::new(api_key, &config.model, Duration::from_secs(config.timeout_seconds))?;
        Ok(client.with_temperature(config.temperature))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send(&self, request: &GenerationRequest) -> std::result::Result<String, CommonError> {
        let body = GeminiRequest::from_generation(request, self.temperature);

        tracing::debug!(
            model = %self.model,
            prompt_chars = request.prompt.len(),
            has_image = request.image.is_some(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(endpoint(&self.model, &self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| CommonError::Api(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CommonError::Api(format!("failed to read body: {}", e.without_url())))?;

        if !status.is_success() {
            return Err(CommonError::Api(format!("status {}: {}", status, text.trim())));
        }

        parse_response(&text)
    }
}

#[async_trait(?Send)]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> plant_ai_common::Result<String> {
        self.send(request).await
    }
}
