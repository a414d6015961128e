//! Shared test support: a deterministic stub embedder.
//!
//! Known skills map to handcrafted unit vectors on fixed axes so cosine
//! similarities between them are exact, controllable values. Unknown strings
//! get a hash-seeded pseudo-random vector on a reserved block of dimensions:
//! deterministic, self-similar, orthogonal to every known skill.

use skillbridge::embedding::engine::l2_normalize;
use skillbridge::embedding::Embedder;
use skillbridge::error::Result;
use std::collections::HashMap;
use xxhash_rust::xxh3::xxh3_64;

pub const STUB_DIM: usize = 24;
const FALLBACK_OFFSET: usize = 16;

pub struct StubEmbedder {
    vectors: HashMap<String, Vec<f32>>,
}

fn axis(i: usize) -> Vec<f32> {
    let mut v = vec![0.0; STUB_DIM];
    v[i] = 1.0;
    v
}

fn blend(i: usize, w: f32, filler: usize) -> Vec<f32> {
    let mut v = vec![0.0; STUB_DIM];
    v[i] = w;
    v[filler] = (1.0 - w * w).sqrt();
    v
}

impl StubEmbedder {
    pub fn new() -> Self {
        let mut vectors = HashMap::new();
        let knowns = [
            "python",
            "sql",
            "pandas",
            "docker",
            "aws",
            "spark",
            "airflow",
            "kubernetes",
            "java",
            "go",
            "excel",
            "communication",
        ];
        for (i, name) in knowns.iter().enumerate() {
            vectors.insert(name.to_string(), axis(i));
        }

        // Synthetic near-neighbors with exact cosine similarities:
        //   postgres ~ sql   at 0.70 (partial band)
        //   golang   ~ go    at 0.90 (strong band)
        //   ms excel ~ excel at 0.65 (partial band)
        vectors.insert("postgres".to_string(), blend(1, 0.70, 12));
        vectors.insert("golang".to_string(), blend(9, 0.90, 13));
        vectors.insert("ms excel".to_string(), blend(10, 0.65, 14));
        vectors.insert("terraform".to_string(), axis(15));

        Self { vectors }
    }

    fn fallback_vector(text: &str) -> Vec<f32> {
        let mut state = xxh3_64(text.as_bytes());
        let mut v = vec![0.0; STUB_DIM];
        for x in v.iter_mut().skip(FALLBACK_OFFSET) {
            // splitmix64 step
            state = state.wrapping_add(0x9E3779B97F4A7C15);
            let mut z = state;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
            z ^= z >> 31;
            *x = (z as f32 / u64::MAX as f32) * 2.0 - 1.0;
        }
        l2_normalize(v)
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let key = text.to_lowercase();
        self.vectors
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Self::fallback_vector(&key))
    }
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder for StubEmbedder {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }
}
