//! TF-IDF feature extraction over a vocabulary fixed at training time.

use crate::tokenize::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Vectorizer turning raw text into fixed-width TF-IDF feature vectors.
///
/// The vocabulary and idf table are fitted once on the training corpus and
/// frozen afterwards; tokens outside the vocabulary contribute zero weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Vocabulary: token -> column index.
    vocabulary: HashMap<String, usize>,
    /// Smoothed inverse document frequency per column.
    idf: Vec<f64>,
    /// Number of documents seen during fit.
    n_documents: usize,
}

impl TfidfVectorizer {
    /// Fit vocabulary and idf table on the training documents.
    pub fn fit(documents: &[String]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique: std::collections::HashSet<String> = tokenize(doc).into_iter().collect();
            for token in unique {
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
                let next_idx = vocabulary.len();
                vocabulary.entry(token).or_insert(next_idx);
            }
        }

        let n_documents = documents.len();
        let mut idf = vec![0.0; vocabulary.len()];
        for (token, &idx) in &vocabulary {
            let df = document_frequency.get(token).copied().unwrap_or(0);
            // Smoothed idf: ln((1 + N) / (1 + df)) + 1
            idf[idx] = ((1.0 + n_documents as f64) / (1.0 + df as f64)).ln() + 1.0;
        }

        Self {
            vocabulary,
            idf,
            n_documents,
        }
    }

    /// Transform a document into an L2-normalised TF-IDF vector.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut features = vec![0.0; self.vocabulary.len()];

        for token in tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                features[idx] += 1.0;
            }
        }

        for (idx, value) in features.iter_mut().enumerate() {
            *value *= self.idf[idx];
        }

        let norm = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }

        features
    }

    /// Width of the fitted feature space.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn transform_is_deterministic() {
        let v = TfidfVectorizer::fit(&docs(&[
            "win a free prize",
            "meeting tomorrow morning",
            "free cash offer",
        ]));
        let a = v.transform("free prize inside");
        let b = v.transform("free prize inside");
        assert_eq!(a, b);
        assert_eq!(a.len(), v.vocabulary_size());
    }

    #[test]
    fn unknown_tokens_contribute_zero() {
        let v = TfidfVectorizer::fit(&docs(&["win a free prize"]));
        let out = v.transform("completely unrelated words");
        assert!(out.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn transform_is_l2_normalised() {
        let v = TfidfVectorizer::fit(&docs(&[
            "win a free prize",
            "meeting tomorrow morning",
        ]));
        let out = v.transform("win free meeting");
        let norm = out.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }
}
