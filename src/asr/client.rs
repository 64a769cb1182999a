use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ScriberError};
use crate::models::RawFragment;

use super::Recognizer;

const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for the remote recognition service client
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    /// Base URL of the recognition service (e.g. "http://127.0.0.1:9090")
    pub endpoint: String,
    /// Model identifier requested from the service
    pub model: String,
    /// Per-request timeout; recognition of long media is slow
    pub timeout: Duration,
}

impl RecognizerConfig {
    /// Model requested when none is configured
    pub const DEFAULT_MODEL: &'static str = "whisper-large-v3-turbo";

    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let endpoint =
            std::env::var("SCRIBER_ASR_URL").map_err(|_| ScriberError::Config {
                message: "SCRIBER_ASR_URL environment variable not set".to_string(),
            })?;
        let model = std::env::var("SCRIBER_ASR_MODEL")
            .unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());

        Ok(Self {
            endpoint,
            model,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Create with custom settings
    pub fn new(endpoint: String, model: String) -> Self {
        Self {
            endpoint,
            model,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Client for a remote Whisper-style recognition service.
///
/// Uploads the media file and decodes the service's chunk collection into
/// raw fragments, leaving all timing validation to normalization.
pub struct HttpRecognizer {
    client: Client,
    config: RecognizerConfig,
}

impl HttpRecognizer {
    pub fn new(config: RecognizerConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn recognize_url(&self) -> String {
        format!(
            "{}/v1/recognize",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Recognizer for HttpRecognizer {
    async fn recognize(&self, media: &Path) -> Result<Vec<RawFragment>> {
        let bytes = tokio::fs::read(media).await?;
        let file_name = media
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        debug!("Uploading {} bytes from {:?}", bytes.len(), media);

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("model", self.config.model.clone());

        let url = self.recognize_url();
        let response = self
            .client
            .post(&url)
            .timeout(self.config.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ScriberError::Recognition {
                message: format!("request to {url} failed: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ScriberError::Recognition {
                message: format!("recognition service error: {status} - {body}"),
            });
        }

        let decoded: RecognitionResponse =
            response.json().await.map_err(|e| ScriberError::Recognition {
                message: format!("failed to decode recognition response: {e}"),
            })?;

        let Some(chunks) = decoded.chunks else {
            return Err(ScriberError::MissingUpstreamOutput);
        };

        Ok(chunks.into_iter().map(RawFragment::from).collect())
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

/// Response body from the recognition service
#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionResponse {
    /// Timestamped chunks; absent when the service found nothing intelligible
    #[serde(default)]
    pub chunks: Option<Vec<RecognitionChunk>>,
}

/// A single recognized chunk with an approximate timestamp pair
#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionChunk {
    /// `[start, end]` in seconds; the pair or either element may be null
    #[serde(default)]
    pub timestamp: Option<(Option<f64>, Option<f64>)>,
    #[serde(default)]
    pub text: String,
}

impl From<RecognitionChunk> for RawFragment {
    fn from(chunk: RecognitionChunk) -> Self {
        let (start, end) = chunk.timestamp.unwrap_or((None, None));
        Self {
            start,
            end,
            text: chunk.text,
        }
    }
}
