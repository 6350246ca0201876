//! HTTP embedding provider speaking the OpenAI-compatible wire shape.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{EmbeddingError, EmbeddingProvider};

/// Environment variable naming the embeddings API base URL.
pub const ENV_EMBED_URL: &str = "RAGPROBE_EMBED_URL";
/// Environment variable naming the embedding model.
pub const ENV_EMBED_MODEL: &str = "RAGPROBE_EMBED_MODEL";
/// Environment variable naming the embedding dimension.
pub const ENV_EMBED_DIM: &str = "RAGPROBE_EMBED_DIM";
/// Environment variable holding the API key. `OPENAI_API_KEY` also works.
pub const ENV_EMBED_API_KEY: &str = "RAGPROBE_EMBED_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
const DEFAULT_MODEL: &str = "text-embedding-3-small";
const DEFAULT_DIMENSION: usize = 1536;

/// Connection settings for a remote embeddings endpoint.
#[derive(Debug, Clone)]
pub struct RemoteEmbeddingConfig {
    base_url: Url,
    model: String,
    dimension: usize,
    api_key: Option<String>,
}

impl RemoteEmbeddingConfig {
    /// Settings for an endpoint at `base_url` (e.g. `https://api.openai.com/v1`).
    ///
    /// # Errors
    ///
    /// [`EmbeddingError::Endpoint`] when the URL does not parse,
    /// [`EmbeddingError::Config`] when `dimension` is zero.
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        dimension: usize,
    ) -> Result<Self, EmbeddingError> {
        if dimension == 0 {
            return Err(EmbeddingError::Config {
                reason: "embedding dimension must be nonzero".to_string(),
            });
        }
        let mut base_url = Url::parse(base_url)?;
        // Url::join replaces the last path segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            model: model.into(),
            dimension,
            api_key: None,
        })
    }

    /// Attach a bearer token for authenticated endpoints.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Read settings from the environment, defaulting to OpenAI's endpoint.
    ///
    /// Honors `RAGPROBE_EMBED_URL`, `RAGPROBE_EMBED_MODEL`,
    /// `RAGPROBE_EMBED_DIM`, and `RAGPROBE_EMBED_API_KEY` (falling back to
    /// `OPENAI_API_KEY` for the key).
    ///
    /// # Errors
    ///
    /// [`EmbeddingError::Config`] when a variable is present but malformed.
    pub fn from_env() -> Result<Self, EmbeddingError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base_url =
            std::env::var(ENV_EMBED_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var(ENV_EMBED_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let dimension = match std::env::var(ENV_EMBED_DIM) {
            Ok(raw) => raw.parse().map_err(|_| EmbeddingError::Config {
                reason: format!("{ENV_EMBED_DIM} must be a positive integer, got {raw:?}"),
            })?,
            Err(_) => DEFAULT_DIMENSION,
        };

        let mut config = Self::new(&base_url, model, dimension)?;
        if let Ok(key) =
            std::env::var(ENV_EMBED_API_KEY).or_else(|_| std::env::var("OPENAI_API_KEY"))
        {
            config = config.with_api_key(key);
        }
        Ok(config)
    }

    /// The configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Embedding provider backed by an OpenAI-compatible `/embeddings` endpoint.
///
/// Requests carry `{"model": ..., "input": [...]}`. Responses are expected as
/// `{"data": [{"index": 0, "embedding": [...]}, ...]}`; rows are reordered by
/// `index` so output position always matches input position, and every row is
/// checked against the configured dimension.
#[derive(Debug, Clone)]
pub struct RemoteEmbeddingProvider {
    config: RemoteEmbeddingConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    index: usize,
    embedding: Vec<f32>,
}

impl RemoteEmbeddingProvider {
    /// Provider with a default HTTP client.
    #[must_use]
    pub fn new(config: RemoteEmbeddingConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Provider with a caller-supplied client (proxies, timeouts, TLS setup).
    #[must_use]
    pub fn with_client(config: RemoteEmbeddingConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn endpoint(&self) -> Result<Url, EmbeddingError> {
        Ok(self.config.base_url.join("embeddings")?)
    }
}

#[async_trait]
impl EmbeddingProvider for RemoteEmbeddingProvider {
    fn dimension(&self) -> usize {
        self.config.dimension
    }

    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let endpoint = self.endpoint()?;
        let request = EmbeddingRequest {
            model: &self.config.model,
            input: texts,
        };
        let mut builder = self.client.post(endpoint.clone()).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: EmbeddingResponse = response.json().await?;
        if body.data.len() != texts.len() {
            return Err(EmbeddingError::BatchShape {
                expected: texts.len(),
                got: body.data.len(),
            });
        }

        let mut rows = body.data;
        rows.sort_by_key(|row| row.index);
        let mut vectors = Vec::with_capacity(rows.len());
        for row in rows {
            if row.embedding.len() != self.config.dimension {
                return Err(EmbeddingError::Dimension {
                    expected: self.config.dimension,
                    got: row.embedding.len(),
                });
            }
            vectors.push(row.embedding);
        }
        debug!(batch = texts.len(), endpoint = %endpoint, "embedded batch");
        Ok(vectors)
    }
}
