use crate::Embedder;
use crate::error::EmbeddingError;
use crate::error::Result;
use async_trait::async_trait;
use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

fn default_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Configuration for [`HttpEmbedder`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpEmbeddingConfig {
    /// Full URL of the embeddings endpoint, e.g. `https://host/v1/embeddings`
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Sent as a bearer token when present
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Reject responses whose vector length differs from this
    #[serde(default)]
    pub dimension: Option<usize>,
}

impl HttpEmbeddingConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            dimension: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Embedder backed by an OpenAI-compatible HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    http: reqwest::Client,
    config: HttpEmbeddingConfig,
}

impl HttpEmbedder {
    pub fn new(config: HttpEmbeddingConfig) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "embedding endpoint must not be empty".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &HttpEmbeddingConfig {
        &self.config
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "cannot embed empty text".to_string(),
            ));
        }

        let mut request = self.http.post(&self.config.endpoint).json(&EmbeddingRequest {
            model: &self.config.model,
            input: text,
        });
        if let Some(key) = &self.config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| EmbeddingError::InvalidInput(format!("invalid api key: {e}")))?;
            request = request.header(AUTHORIZATION, value);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::MalformedResponse(e.to_string()))?;
        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .ok_or_else(|| EmbeddingError::MalformedResponse("no embedding in response".into()))?;

        if let Some(expected) = self.config.dimension {
            if embedding.len() != expected {
                return Err(EmbeddingError::MalformedResponse(format!(
                    "expected {expected} dimensions, got {}",
                    embedding.len()
                )));
            }
        }

        debug!(
            "Embedded {} chars into {} dimensions",
            text.len(),
            embedding.len()
        );
        Ok(embedding)
    }

    fn dimension(&self) -> Option<usize> {
        self.config.dimension
    }
}
