//! Hashed TF-IDF embedding provider.
//!
//! Terms are hashed into fixed-dimension buckets with FNV-1a and weighted by
//! term frequency. Latin words are single terms; CJK runs contribute every
//! character and every adjacent character pair, since they carry no spaces.

use std::collections::HashMap;

use docai_core::errors::{DocaiError, DocaiResult};
use docai_core::traits::IEmbeddingProvider;

/// Deterministic embedding provider with no external dependencies.
pub struct HashedTfIdfEmbedder {
    dimensions: usize,
}

impl HashedTfIdfEmbedder {
    /// # Errors
    /// `InvalidInput` when `dimensions` is zero.
    pub fn new(dimensions: usize) -> DocaiResult<Self> {
        if dimensions == 0 {
            return Err(DocaiError::invalid_input(
                "embedding dimensions must be greater than zero",
            ));
        }
        Ok(Self { dimensions })
    }

    /// Hash a term into a bucket index using FNV-1a.
    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % dims as u64) as usize
    }

    /// Split text into lowercase terms.
    pub fn terms(text: &str) -> Vec<String> {
        let mut terms = Vec::new();
        for word in text.split(|c: char| !c.is_alphanumeric() && c != '_') {
            let mut latin = String::new();
            let mut cjk: Vec<char> = Vec::new();
            for c in word.chars() {
                if is_cjk(c) {
                    push_latin(&mut latin, &mut terms);
                    cjk.push(c);
                } else {
                    push_cjk(&mut cjk, &mut terms);
                    latin.push(c);
                }
            }
            push_latin(&mut latin, &mut terms);
            push_cjk(&mut cjk, &mut terms);
        }
        terms
    }

    fn tfidf_vector(&self, text: &str) -> Vec<f32> {
        let terms = Self::terms(text);
        if terms.is_empty() {
            return vec![0.0; self.dimensions];
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for term in &terms {
            *tf.entry(term.as_str()).or_default() += 1.0;
        }

        let total = terms.len() as f32;
        let mut vec = vec![0.0f32; self.dimensions];
        for (term, count) in &tf {
            let freq = count / total;
            // Longer terms are rarer; weight them up.
            let idf = 1.0 + (term.chars().count() as f32).ln();
            vec[Self::hash_term(term, self.dimensions)] += freq * idf;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x3040..=0x30FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xAC00..=0xD7AF
        | 0xF900..=0xFAFF
        | 0x20000..=0x2A6DF)
}

fn push_latin(latin: &mut String, terms: &mut Vec<String>) {
    if latin.chars().count() >= 2 {
        terms.push(latin.to_lowercase());
    }
    latin.clear();
}

fn push_cjk(run: &mut Vec<char>, terms: &mut Vec<String>) {
    for c in run.iter() {
        terms.push(c.to_string());
    }
    for pair in run.windows(2) {
        terms.push(pair.iter().collect());
    }
    run.clear();
}

impl IEmbeddingProvider for HashedTfIdfEmbedder {
    fn embed(&self, text: &str) -> DocaiResult<Vec<f32>> {
        Ok(self.tfidf_vector(text))
    }

    fn embed_batch(&self, texts: &[String]) -> DocaiResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.tfidf_vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-tfidf"
    }

    fn is_available(&self) -> bool {
        true
    }
}
