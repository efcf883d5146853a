use crate::Embedder;
use crate::error::EmbeddingError;
use crate::error::Result;
use async_trait::async_trait;
use fastembed::EmbeddingModel;
use fastembed::InitOptions;
use fastembed::TextEmbedding;
use log::info;
use serde::Deserialize;
use serde::Serialize;

/// Models the local embedder knows how to load
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocalModel {
    /// nomic-embed-text-v1.5, 768 dimensions, supports Matryoshka truncation
    NomicEmbedTextV15,
    /// all-MiniLM-L6-v2, 384 dimensions, small and fast
    AllMiniLmL6V2,
}

impl LocalModel {
    fn native_dimension(self) -> usize {
        match self {
            LocalModel::NomicEmbedTextV15 => 768,
            LocalModel::AllMiniLmL6V2 => 384,
        }
    }

    fn to_fastembed(self) -> EmbeddingModel {
        match self {
            LocalModel::NomicEmbedTextV15 => EmbeddingModel::NomicEmbedTextV15,
            LocalModel::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalEmbeddingConfig {
    pub model: LocalModel,

    /// Truncate vectors to this length. `None` keeps the model's size.
    pub dimension: Option<usize>,

    pub show_download_progress: bool,
}

impl Default for LocalEmbeddingConfig {
    fn default() -> Self {
        Self {
            model: LocalModel::AllMiniLmL6V2,
            dimension: None,
            show_download_progress: false,
        }
    }
}

/// Embedder running an ONNX model in-process via fastembed.
///
/// Model files are downloaded on first use and cached by fastembed.
pub struct LocalEmbedder {
    model: TextEmbedding,
    config: LocalEmbeddingConfig,
}

impl LocalEmbedder {
    pub fn new(config: LocalEmbeddingConfig) -> Result<Self> {
        info!("Loading local embedding model {:?}", config.model);
        let options = InitOptions::new(config.model.to_fastembed())
            .with_show_download_progress(config.show_download_progress);
        let model = TextEmbedding::try_new(options)
            .map_err(|e| EmbeddingError::ModelInitialization(e.to_string()))?;
        Ok(Self { model, config })
    }
}

#[async_trait]
impl Embedder for LocalEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "cannot embed empty text".to_string(),
            ));
        }
        let mut embedding = self
            .model
            .embed(vec![text], None)
            .map_err(|e| EmbeddingError::EmbeddingGeneration(e.to_string()))?
            .pop()
            .ok_or_else(|| EmbeddingError::EmbeddingGeneration("No embedding generated".into()))?;
        if let Some(dimension) = self.config.dimension {
            embedding.truncate(dimension);
        }
        Ok(embedding)
    }

    fn dimension(&self) -> Option<usize> {
        Some(
            self.config
                .dimension
                .unwrap_or_else(|| self.config.model.native_dimension())
                .min(self.config.model.native_dimension()),
        )
    }
}
