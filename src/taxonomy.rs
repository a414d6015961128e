//! Skill taxonomy normalization — maps free-text skills to canonical names

use crate::config::MatchingConfig;
use crate::embedding::Embedder;
use crate::error::{Result, SkillBridgeError};
use crate::matching::SkillIndex;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

/// Category assumed for skills the taxonomy does not know. Its weight is the
/// default category weight, so scoring is always defined.
pub const DEFAULT_CATEGORY: &str = "technical";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub canonical_name: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    categories: Vec<TaxonomyCategory>,
}

#[derive(Debug, Deserialize)]
struct TaxonomyCategory {
    name: String,
    skills: Vec<String>,
}

/// The canonical skill vocabulary, loaded once and read-only thereafter.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    entries: Vec<TaxonomyEntry>,
    by_name: HashMap<String, usize>,
}

impl Taxonomy {
    pub fn from_entries(raw: Vec<TaxonomyEntry>) -> Self {
        let mut entries = Vec::with_capacity(raw.len());
        let mut by_name = HashMap::new();
        for entry in raw {
            let key = entry.canonical_name.to_lowercase();
            if by_name.contains_key(&key) {
                log::warn!("Duplicate taxonomy skill ignored: {}", entry.canonical_name);
                continue;
            }
            by_name.insert(key, entries.len());
            entries.push(entry);
        }
        Self { entries, by_name }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: TaxonomyFile = serde_json::from_str(json)?;
        let mut entries = Vec::new();
        for category in file.categories {
            for skill in category.skills {
                entries.push(TaxonomyEntry {
                    canonical_name: skill,
                    category: category.name.clone(),
                });
            }
        }
        if entries.is_empty() {
            return Err(SkillBridgeError::Taxonomy(
                "taxonomy contains no skills".to_string(),
            ));
        }
        Ok(Self::from_entries(entries))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    pub fn skill_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.canonical_name.clone())
            .collect()
    }

    /// Taxonomy category for a skill name, or the default when unknown.
    pub fn category_of(&self, skill_name: &str) -> &str {
        self.by_name
            .get(&skill_name.to_lowercase())
            .map(|&i| self.entries[i].category.as_str())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps noisy free-text skill mentions onto the canonical vocabulary via
/// nearest-neighbor search over taxonomy embeddings.
///
/// The index is built lazily on first use and cached for the process;
/// `invalidate_index` forces a rebuild after a taxonomy change. Reads are
/// safe from concurrent threads, and concurrent first calls build the
/// index exactly once.
pub struct TaxonomyNormalizer {
    taxonomy: Taxonomy,
    embedder: Arc<dyn Embedder>,
    threshold: f32,
    index: RwLock<Option<Arc<SkillIndex>>>,
}

impl TaxonomyNormalizer {
    pub fn new(taxonomy: Taxonomy, embedder: Arc<dyn Embedder>, config: &MatchingConfig) -> Self {
        Self {
            taxonomy,
            embedder,
            threshold: config.normalization_threshold,
            index: RwLock::new(None),
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    fn index(&self) -> Result<Arc<SkillIndex>> {
        if let Some(index) = self.index.read().as_ref() {
            return Ok(Arc::clone(index));
        }

        let mut slot = self.index.write();
        // Another thread may have built it while we waited for the lock.
        if let Some(index) = slot.as_ref() {
            return Ok(Arc::clone(index));
        }

        log::info!(
            "Building taxonomy index over {} skills",
            self.taxonomy.len()
        );
        let index = Arc::new(SkillIndex::build(
            self.embedder.as_ref(),
            &self.taxonomy.skill_names(),
        )?);
        *slot = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Drop the cached index so the next call rebuilds it.
    pub fn invalidate_index(&self) {
        *self.index.write() = None;
    }

    /// Map a free-text skill to the closest canonical taxonomy skill.
    ///
    /// Returns the canonical name if similarity meets the configured
    /// threshold, else `None`. Singular lookup is strict: the caller decides
    /// whether to drop or keep the raw text.
    pub fn normalize_skill(&self, skill_text: &str) -> Result<Option<String>> {
        let index = self.index()?;
        let query = self.embedder.encode_single(skill_text)?;
        match index.search(&query) {
            Some((i, sim)) if sim >= self.threshold => {
                Ok(index.skill(i).map(|s| s.to_string()))
            }
            _ => Ok(None),
        }
    }

    /// Normalize a batch of skills, keeping originals that have no close
    /// canonical match. Duplicates after normalization are removed; order is
    /// not preserved.
    pub fn normalize_skills(&self, skill_texts: &[String]) -> Result<Vec<String>> {
        if skill_texts.is_empty() {
            return Ok(Vec::new());
        }

        let index = self.index()?;
        let queries = self.embedder.encode(skill_texts)?;

        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for (text, query) in skill_texts.iter().zip(queries.iter()) {
            let normalized = match index.search(query) {
                Some((i, sim)) if sim >= self.threshold => index
                    .skill(i)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| text.clone()),
                _ => text.clone(),
            };
            if seen.insert(normalized.to_lowercase()) {
                result.push(normalized);
            }
        }
        Ok(result)
    }

    /// Category lookup for a (typically already-canonical) skill name.
    pub fn category_of(&self, skill_name: &str) -> &str {
        self.taxonomy.category_of(skill_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::test_support::StubEmbedder;

    const TAXONOMY_JSON: &str = r#"{
        "categories": [
            {"name": "critical_core", "skills": ["Python", "SQL"]},
            {"name": "technical", "skills": ["Docker", "Go", "Excel"]},
            {"name": "generic", "skills": ["Communication"]}
        ]
    }"#;

    fn normalizer() -> TaxonomyNormalizer {
        let taxonomy = Taxonomy::from_json_str(TAXONOMY_JSON).unwrap();
        let config = Config::default();
        TaxonomyNormalizer::new(taxonomy, Arc::new(StubEmbedder::new()), &config.matching)
    }

    #[test]
    fn test_taxonomy_parsing() {
        let taxonomy = Taxonomy::from_json_str(TAXONOMY_JSON).unwrap();
        assert_eq!(taxonomy.len(), 6);
        assert_eq!(taxonomy.category_of("Python"), "critical_core");
        assert_eq!(taxonomy.category_of("python"), "critical_core");
        assert_eq!(taxonomy.category_of("Communication"), "generic");
        assert_eq!(taxonomy.category_of("Quantum Basket Weaving"), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_duplicate_entries_ignored() {
        let taxonomy = Taxonomy::from_entries(vec![
            TaxonomyEntry {
                canonical_name: "Python".to_string(),
                category: "critical_core".to_string(),
            },
            TaxonomyEntry {
                canonical_name: "python".to_string(),
                category: "technical".to_string(),
            },
        ]);
        assert_eq!(taxonomy.len(), 1);
        assert_eq!(taxonomy.category_of("Python"), "critical_core");
    }

    #[test]
    fn test_empty_taxonomy_rejected() {
        let result = Taxonomy::from_json_str(r#"{"categories": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_skill_strict() {
        let normalizer = normalizer();

        // golang ~ Go at 0.9, above the 0.75 threshold
        assert_eq!(
            normalizer.normalize_skill("golang").unwrap(),
            Some("Go".to_string())
        );

        // postgres ~ SQL at 0.7, below threshold: strict lookup returns None
        assert_eq!(normalizer.normalize_skill("postgres").unwrap(), None);
    }

    #[test]
    fn test_normalize_skills_lenient_passthrough() {
        let normalizer = normalizer();
        let result = normalizer
            .normalize_skills(&["golang".to_string(), "postgres".to_string()])
            .unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.contains(&"Go".to_string()));
        // Unmatched raw text passes through unchanged
        assert!(result.contains(&"postgres".to_string()));
    }

    #[test]
    fn test_normalize_skills_dedupes() {
        let normalizer = normalizer();
        let result = normalizer
            .normalize_skills(&[
                "golang".to_string(),
                "Go".to_string(),
                "python".to_string(),
            ])
            .unwrap();

        // golang and Go both normalize to the canonical Go entry
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_normalize_empty_input() {
        let normalizer = normalizer();
        assert!(normalizer.normalize_skills(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_index_invalidation_rebuilds() {
        let normalizer = normalizer();
        assert!(normalizer.normalize_skill("python").unwrap().is_some());
        normalizer.invalidate_index();
        assert_eq!(
            normalizer.normalize_skill("python").unwrap(),
            Some("Python".to_string())
        );
    }
}
