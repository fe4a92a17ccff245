use crate::Result;
use super::Embedder;
use fastembed::{TextEmbedding, InitOptions, EmbeddingModel};

/// Engine for generating text embeddings using a local transformer model
pub struct EmbeddingEngine {
    model: TextEmbedding,
}

impl EmbeddingEngine {
    /// Create a new embedding engine with the default model (all-MiniLM-L6-v2)
    pub fn new() -> Result<Self> {
        let mut options = InitOptions::default();
        options.model_name = EmbeddingModel::AllMiniLML6V2;
        options.show_download_progress = true;

        let model = TextEmbedding::try_new(options)
            .map_err(|e| crate::Error::Embedding(format!("Failed to load embedding model: {}", e)))?;

        tracing::info!("Loaded embedding model all-MiniLM-L6-v2");
        Ok(Self { model })
    }

    /// Generate a single embedding for a question
    pub fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.model.embed(vec![query.to_string()], None)
            .map_err(|e| crate::Error::Embedding(format!("Query embedding failed: {}", e)))?;

        if embeddings.is_empty() {
            return Err(crate::Error::Embedding("model returned no embedding".to_string()));
        }
        Ok(embeddings.remove(0))
    }
}

impl Embedder for EmbeddingEngine {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_query(text)
    }
}
