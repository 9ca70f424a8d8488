//! Translation provider gateway

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::config::ProviderConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::LanguagePair;

/// A service that translates text for a language pair
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `text`. One attempt, no retry.
    async fn translate(&self, text: &str, languages: &LanguagePair) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "responseData")]
    response_data: ResponseData,
    #[serde(rename = "responseStatus", default)]
    response_status: Option<serde_json::Value>,
    #[serde(rename = "responseDetails", default)]
    response_details: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Extract `responseData.translatedText` from a MyMemory response body
pub fn parse_envelope(body: &str) -> Result<String> {
    let envelope: Envelope = serde_json::from_str(body)?;

    // Quota and language-pair problems arrive as HTTP 200 with a non-200
    // status; the translated text is still what the caller gets.
    if let Some(status) = &envelope.response_status {
        let ok = match status {
            serde_json::Value::Number(n) => n.as_u64() == Some(200),
            serde_json::Value::String(s) => s == "200",
            serde_json::Value::Null => true,
            _ => false,
        };
        if !ok {
            warn!(
                "Provider reported status {}: {}",
                status,
                envelope.response_details.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(envelope.response_data.translated_text)
}

/// Gateway for the public MyMemory API
#[derive(Debug, Clone)]
pub struct MyMemoryProvider {
    client: reqwest::Client,
    config: Arc<ProviderConfig>,
}

impl MyMemoryProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    fn request_url(&self, text: &str, languages: &LanguagePair) -> String {
        let mut url = format!(
            "{}/get?q={}&langpair={}",
            self.config.endpoint.trim_end_matches('/'),
            urlencoding::encode(text),
            urlencoding::encode(&languages.to_string()),
        );
        if let Some(email) = &self.config.contact_email {
            url.push_str("&de=");
            url.push_str(&urlencoding::encode(email));
        }
        url
    }
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    async fn translate(&self, text: &str, languages: &LanguagePair) -> Result<String> {
        let url = self.request_url(text, languages);
        debug!("Requesting translation ({})", languages);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Error making API request: {}", e);
            TranslationError::NetworkError {
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Provider returned {}", status);
            return Err(TranslationError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!("Raw provider response: {}", body);

        match parse_envelope(&body) {
            Ok(translation) => {
                debug!("Extracted translated text: {}", translation);
                Ok(translation)
            }
            Err(e) => {
                warn!("Translation failed: {}", e);
                Err(e)
            }
        }
    }
}
