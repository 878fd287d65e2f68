use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::{language_pairs, TranslationEngine};
use crate::config::TranslateConfig;
use crate::error::{Result, TarjamaError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub model: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub translation: String,
}

/// Translation engine backed by MarianMT models behind a local inference
/// HTTP server. The server loads and caches model/tokenizer pairs by
/// identifier; each call here is single-shot sequence-to-sequence generation.
pub struct MarianEngine {
    client: Client,
    config: TranslateConfig,
}

impl MarianEngine {
    pub fn new(config: TranslateConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TarjamaError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    async fn request_translation(&self, model: &str, text: &str) -> Result<String> {
        let request = TranslationRequest {
            model: model.to_string(),
            text: text.to_string(),
        };

        let url = format!("{}/translate", self.config.endpoint);
        debug!("Sending translation request to: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TarjamaError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TarjamaError::Translation(format!(
                "Inference server error {}: {}",
                status, error_text
            )));
        }

        let result: TranslationResponse = response
            .json()
            .await
            .map_err(|e| TarjamaError::Translation(format!("Invalid response body: {}", e)))?;

        Ok(result.translation)
    }
}

#[async_trait]
impl TranslationEngine for MarianEngine {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        let model = language_pairs::model_for_pair(source_lang, target_lang).ok_or_else(|| {
            TarjamaError::UnsupportedPair {
                source_lang: source_lang.to_string(),
                target_lang: target_lang.to_string(),
            }
        })?;

        info!("Translating with model {}", model);

        let mut last_error = None;
        for attempt in 1..=self.config.max_retries.max(1) {
            match self.request_translation(model, text).await {
                Ok(translation) => return Ok(translation),
                Err(e) => {
                    debug!("Translation attempt {} failed: {}", attempt, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| TarjamaError::Translation("Translation failed".to_string())))
    }
}

/// Check if the inference server is reachable
pub async fn check_server_availability(endpoint: &str) -> Result<()> {
    let client = Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .map_err(|e| TarjamaError::Config(format!("Failed to create HTTP client: {}", e)))?;

    client
        .get(format!("{}/health", endpoint))
        .send()
        .await
        .map_err(|e| {
            TarjamaError::Translation(format!(
                "Inference server not reachable at {}: {}",
                endpoint, e
            ))
        })?
        .error_for_status()
        .map_err(|e| TarjamaError::Translation(format!("Inference server unhealthy: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;

    #[tokio::test]
    async fn test_unsupported_pair_skips_request() {
        // Endpoint is unreachable; an unsupported pair must fail before any
        // network activity happens.
        let config = TranslateConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            ..TranslateConfig::default()
        };
        let engine = MarianEngine::new(config).unwrap();

        let result = engine.translate("hello", "en", "ja").await;
        assert!(matches!(
            result,
            Err(TarjamaError::UnsupportedPair { ref source_lang, ref target_lang })
                if source_lang == "en" && target_lang == "ja"
        ));
    }

    #[test]
    fn test_engine_builds_from_default_config() {
        assert!(MarianEngine::new(TranslateConfig::default()).is_ok());
    }
}
