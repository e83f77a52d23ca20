//! REST client for the Gemini `generateContent` endpoint.
//!
//! # Example
//!
//! ```no_run
//! use cadence_models::{GeminiClient, TextGenerator};
//! use cadence_rate_limit::GeminiSettings;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = GeminiSettings {
//!     model: "models/gemini-2.0-flash".to_string(),
//!     ..Default::default()
//! };
//! let client = GeminiClient::with_api_key(&settings, "my-key")?;
//! assert_eq!(client.model_name(), "gemini-2.0-flash");
//! # Ok(())
//! # }
//! ```

use super::{GeminiResult, GenerateContentRequest, extract_text_from_body};
use crate::TextGenerator;
use async_trait::async_trait;
use cadence_error::{GeminiError, GeminiErrorKind};
use cadence_rate_limit::GeminiSettings;
use std::env;
use tracing::{debug, error, instrument, warn};

const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini REST client bound to one model.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model_name: String,
    endpoint: String,
}

/// Pick the configured key, or the environment's when the configured one is
/// absent or blank.
fn resolve_api_key(configured: Option<&str>, from_env: Option<String>) -> Option<String> {
    configured
        .map(str::to_string)
        .into_iter()
        .chain(from_env)
        .find(|key| !key.trim().is_empty())
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client from settings.
    ///
    /// The key comes from `settings.api_key`, falling back to the
    /// `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::MissingApiKey`] when neither source holds a
    /// non-blank key, or [`GeminiErrorKind::ClientCreation`] when the HTTP
    /// client cannot be built.
    #[instrument(name = "gemini_client_new", skip(settings), fields(model = %settings.model))]
    pub fn from_settings(settings: &GeminiSettings) -> GeminiResult<Self> {
        let api_key = resolve_api_key(settings.api_key.as_deref(), env::var(API_KEY_ENV).ok())
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::MissingApiKey))?;
        Self::with_api_key(settings, &api_key)
    }

    /// Create a client with an explicit key, ignoring `settings.api_key`.
    ///
    /// # Errors
    ///
    /// See [`from_settings`](Self::from_settings).
    pub fn with_api_key(settings: &GeminiSettings, api_key: &str) -> GeminiResult<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey));
        }

        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        let model_name = Self::normalize_model(&settings.model);
        let endpoint = format!(
            "{}{}:generateContent",
            Self::normalize_base_url(&settings.base_url),
            model_name
        );

        debug!(model = %model_name, endpoint = %endpoint, "Created Gemini client");
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model_name,
            endpoint,
        })
    }

    /// Full `generateContent` URL, without the key.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn normalize_model(model: &str) -> String {
        let model = model.trim();
        model.strip_prefix("models/").unwrap_or(model).to_string()
    }

    fn normalize_base_url(base_url: &str) -> String {
        let base_url = base_url.trim();
        if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.model_name, prompt_chars = prompt.chars().count()))]
    async fn generate(&self, prompt: &str) -> GeminiResult<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Gemini request failed");
                GeminiError::new(GeminiErrorKind::ApiRequest(e.without_url().to_string()))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.without_url().to_string())))?;

        if !status.is_success() {
            let err = GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message: body,
            });
            if err.is_rate_limited() {
                warn!(status = status.as_u16(), "Gemini rate limit hit");
            } else {
                error!(status = status.as_u16(), error = %err.kind, "Gemini returned an error");
            }
            return Err(err);
        }

        debug!(status = status.as_u16(), body_len = body.len(), "Gemini call succeeded");
        extract_text_from_body(&body)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
