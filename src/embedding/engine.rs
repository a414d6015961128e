//! Embedding generation using Model2Vec

use crate::config::Config;
use crate::embedding::manager::EmbeddingModelManager;
use crate::error::{Result, SkillBridgeError};
use model2vec_rs::model::StaticModel;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

/// Seam between the matching engine and the embedding backend.
///
/// Implementations must return unit-normalized vectors so that the inner
/// product of two embeddings equals their cosine similarity, and must be
/// deterministic for a fixed model version.
pub trait Embedder: Send + Sync {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    fn encode_single(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.encode(std::slice::from_ref(&text.to_string()))?;
        vectors.pop().ok_or_else(|| {
            SkillBridgeError::Embedding("encoder returned no vector".to_string())
        })
    }
}

/// Model2Vec-backed embedding engine.
///
/// The model is loaded once and kept resident for the process lifetime; a
/// failure to load is fatal for every matching operation downstream. Repeat
/// encodes of the same string are served from an in-process cache.
pub struct EmbeddingEngine {
    model: StaticModel,
    cache: Mutex<HashMap<String, Vec<f32>>>,
    model_name: String,
}

impl EmbeddingEngine {
    pub fn new(model_path: &Path, model_name: &str) -> Result<Self> {
        let start_time = Instant::now();
        log::info!(
            "Loading Model2Vec embedding model from: {}",
            model_path.display()
        );

        let model = StaticModel::from_pretrained(model_path, None, Some(true), None)
            .map_err(|e| SkillBridgeError::ModelLoading(format!("Failed to load model: {}", e)))?;

        log::info!("Model loaded in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            cache: Mutex::new(HashMap::new()),
            model_name: model_name.to_string(),
        })
    }

    /// Resolve, download if needed, and load the configured default model.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let mut manager = EmbeddingModelManager::new(config.models.models_dir.clone()).await?;
        let model_id = config.models.default_embedding_model.clone();
        let model_path = manager.ensure_model_available(&model_id).await?;
        Self::new(&model_path, &model_id)
    }

    /// Run a dummy encode so the first real request does not pay model
    /// initialization latency.
    pub fn warmup(&self) -> Result<()> {
        self.encode(&["warmup".to_string()])?;
        log::info!("Model warmup complete");
        Ok(())
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn cache_size(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    fn encode_uncached(&self, texts: &[String]) -> Vec<Vec<f32>> {
        self.model
            .encode(texts)
            .into_iter()
            .map(|v| l2_normalize(v))
            .collect()
    }
}

impl Embedder for EmbeddingEngine {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut uncached_texts = Vec::new();
        {
            let cache = self.cache.lock();
            for text in texts {
                if !cache.contains_key(text) {
                    uncached_texts.push(text.clone());
                }
            }
        }

        if !uncached_texts.is_empty() {
            let embeddings = self.encode_uncached(&uncached_texts);
            let mut cache = self.cache.lock();
            for (text, embedding) in uncached_texts.into_iter().zip(embeddings) {
                cache.insert(text, embedding);
            }
        }

        let cache = self.cache.lock();
        texts
            .iter()
            .map(|text| {
                cache.get(text).cloned().ok_or_else(|| {
                    SkillBridgeError::Embedding(format!("no embedding produced for {:?}", text))
                })
            })
            .collect()
    }
}

/// Scale a vector to unit L2 norm. Zero vectors are returned unchanged.
pub fn l2_normalize(mut v: Vec<f32>) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut v {
            *x /= norm;
        }
    }
    v
}

/// Cosine similarity between two vectors of equal dimension.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_normalize() {
        let v = l2_normalize(vec![3.0, 4.0]);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);

        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_zero_vector() {
        let v = l2_normalize(vec![0.0, 0.0, 0.0]);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_dimension_mismatch() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }
}
