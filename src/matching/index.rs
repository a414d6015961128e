//! Flat inner-product nearest-neighbor index over skill embeddings

use crate::embedding::Embedder;
use crate::error::Result;

/// In-memory nearest-neighbor index over a list of skill strings.
///
/// Vectors are unit-normalized, so the inner product is the cosine
/// similarity and an exhaustive scan finds the true nearest neighbor.
/// Indexes are cheap to build and ephemeral; callers that score many
/// targets against one skill set build the index once and reuse it.
pub struct SkillIndex {
    skills: Vec<String>,
    vectors: Vec<Vec<f32>>,
}

impl SkillIndex {
    pub fn build(embedder: &dyn Embedder, skills: &[String]) -> Result<Self> {
        let vectors = embedder.encode(skills)?;
        Ok(Self {
            skills: skills.to_vec(),
            vectors,
        })
    }

    /// Nearest entry to `query` by inner product, with its similarity.
    pub fn search(&self, query: &[f32]) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (i, vector) in self.vectors.iter().enumerate() {
            let sim: f32 = vector.iter().zip(query.iter()).map(|(a, b)| a * b).sum();
            match best {
                Some((_, best_sim)) if sim <= best_sim => {}
                _ => best = Some((i, sim)),
            }
        }
        best
    }

    pub fn skill(&self, index: usize) -> Option<&str> {
        self.skills.get(index).map(|s| s.as_str())
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Whether any indexed skill equals `text` ignoring ASCII case.
    pub fn contains_text(&self, text: &str) -> bool {
        self.skills.iter().any(|s| s.eq_ignore_ascii_case(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubEmbedder;

    #[test]
    fn test_search_finds_nearest() {
        let embedder = StubEmbedder::new();
        let skills = vec!["Python".to_string(), "SQL".to_string()];
        let index = SkillIndex::build(&embedder, &skills).unwrap();

        let query = embedder.encode_single("python").unwrap();
        let (i, sim) = index.search(&query).unwrap();
        assert_eq!(index.skill(i), Some("Python"));
        assert!((sim - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_index() {
        let embedder = StubEmbedder::new();
        let index = SkillIndex::build(&embedder, &[]).unwrap();
        assert!(index.is_empty());
        assert!(index.search(&[1.0, 0.0]).is_none());
    }

    #[test]
    fn test_contains_text_case_insensitive() {
        let embedder = StubEmbedder::new();
        let skills = vec!["Python".to_string()];
        let index = SkillIndex::build(&embedder, &skills).unwrap();
        assert!(index.contains_text("PYTHON"));
        assert!(!index.contains_text("Rust"));
    }
}
