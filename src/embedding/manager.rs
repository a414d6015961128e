//! Download and local management of Model2Vec embedding models

use crate::error::{Result, SkillBridgeError};
use hf_hub::api::tokio::Api;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Information about an available embedding model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModelInfo {
    pub name: String,
    pub repo_id: String,
    pub size_mb: u64,
    pub description: String,
    pub dimensions: u32,
}

/// Manager for embedding models - handles download, caching, and selection
pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: HashMap<String, EmbeddingModelInfo>,
    downloaded_models: HashSet<String>,
    api: Api,
}

impl EmbeddingModelManager {
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await.map_err(|e| {
                SkillBridgeError::ModelLoading(format!("Failed to create models directory: {}", e))
            })?;
        }

        let api = Api::new().map_err(|e| {
            SkillBridgeError::ModelLoading(format!("Failed to initialize HF API: {}", e))
        })?;

        let mut manager = Self {
            models_dir,
            available_models: HashMap::new(),
            downloaded_models: HashSet::new(),
            api,
        };

        manager.init_available_models();
        manager.scan_downloaded_models().await?;

        Ok(manager)
    }

    fn init_available_models(&mut self) {
        self.available_models.insert(
            "potion-base-8M".to_string(),
            EmbeddingModelInfo {
                name: "Potion Base 8M".to_string(),
                repo_id: "minishlab/potion-base-8M".to_string(),
                size_mb: 33,
                description: "High-quality Model2Vec embeddings with 8M parameters".to_string(),
                dimensions: 256,
            },
        );

        self.available_models.insert(
            "m2v-base".to_string(),
            EmbeddingModelInfo {
                name: "Model2Vec Base".to_string(),
                repo_id: "minishlab/M2V_base_output".to_string(),
                size_mb: 90,
                description: "Legacy Model2Vec base embeddings model".to_string(),
                dimensions: 256,
            },
        );

        self.available_models.insert(
            "m2v-large".to_string(),
            EmbeddingModelInfo {
                name: "Model2Vec Large".to_string(),
                repo_id: "minishlab/M2V_large_output".to_string(),
                size_mb: 250,
                description: "High-capacity Model2Vec large embeddings model".to_string(),
                dimensions: 512,
            },
        );
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await.map_err(|e| {
            SkillBridgeError::ModelLoading(format!("Failed to scan models directory: {}", e))
        })?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            SkillBridgeError::ModelLoading(format!("Failed to read directory entry: {}", e))
        })? {
            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            if is_dir && Self::is_valid_model_directory(&entry.path()).await {
                let model_name = entry.file_name().to_string_lossy().to_string();
                self.downloaded_models.insert(model_name);
            }
        }

        Ok(())
    }

    /// A usable Model2Vec directory has a tokenizer and safetensors weights.
    async fn is_valid_model_directory(path: &Path) -> bool {
        fs::metadata(path.join("model.safetensors")).await.is_ok()
            && fs::metadata(path.join("tokenizer.json")).await.is_ok()
            && fs::metadata(path.join("config.json")).await.is_ok()
    }

    /// Download an embedding model from the Hugging Face Hub.
    pub async fn download_model(&mut self, model_id: &str) -> Result<PathBuf> {
        let model_info = self
            .available_models
            .get(model_id)
            .ok_or_else(|| {
                SkillBridgeError::ModelNotFound(format!("Unknown embedding model: {}", model_id))
            })?
            .clone();

        let model_dir = self.models_dir.join(model_id);
        if self.downloaded_models.contains(model_id) {
            return Ok(model_dir);
        }

        log::info!(
            "Downloading embedding model {} ({} MB) from {}",
            model_info.name,
            model_info.size_mb,
            model_info.repo_id
        );

        fs::create_dir_all(&model_dir).await.map_err(|e| {
            SkillBridgeError::ModelLoading(format!("Failed to create model directory: {}", e))
        })?;

        let repo = self.api.repo(hf_hub::Repo::model(model_info.repo_id.clone()));

        let required_files = ["model.safetensors", "tokenizer.json", "config.json"];
        for file in &required_files {
            let file_path = repo.get(file).await.map_err(|e| {
                SkillBridgeError::ModelLoading(format!(
                    "Failed to download required file {}: {}",
                    file, e
                ))
            })?;
            let dest_path = model_dir.join(file);
            fs::copy(&file_path, &dest_path).await.map_err(|e| {
                SkillBridgeError::ModelLoading(format!("Failed to copy {}: {}", file, e))
            })?;
            log::debug!("Downloaded {}", file);
        }

        self.downloaded_models.insert(model_id.to_string());
        log::info!("Embedding model {} downloaded", model_info.name);
        Ok(model_dir)
    }

    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        if self.downloaded_models.contains(model_id) {
            Some(self.models_dir.join(model_id))
        } else {
            None
        }
    }

    /// Get or download a model, returning its local path.
    pub async fn ensure_model_available(&mut self, model_id: &str) -> Result<PathBuf> {
        if let Some(path) = self.get_model_path(model_id) {
            return Ok(path);
        }
        self.download_model(model_id).await
    }

    pub fn list_available_models(&self) -> Vec<&EmbeddingModelInfo> {
        let mut models: Vec<_> = self.available_models.values().collect();
        models.sort_by(|a, b| a.name.cmp(&b.name));
        models
    }

    pub fn list_downloaded_models(&self) -> Vec<String> {
        let mut models: Vec<_> = self.downloaded_models.iter().cloned().collect();
        models.sort();
        models
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }

    /// Resolve a model ID from an ID, repo ID, or display name.
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        if self.available_models.contains_key(input) {
            return Some(input.to_string());
        }

        for (id, info) in &self.available_models {
            if info.repo_id == input {
                return Some(id.clone());
            }
        }

        let input_lower = input.to_lowercase();
        for (id, info) in &self.available_models {
            if info.name.to_lowercase() == input_lower {
                return Some(id.clone());
            }
        }

        None
    }
}
