//! Prediction service: validate, vectorize, classify, format.

use crate::artifact::ModelArtifact;
use crate::errors::{SieveError, SieveResult};
use crate::keywords::{extract_keywords, KeywordHit};
use crate::label::Label;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of one prediction. Created fresh per request, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub label: Label,
    pub confidence: f64,
    pub keywords: Vec<KeywordHit>,
}

/// Stateless request/response classifier over an immutable shared model.
///
/// The model is loaded once at startup. If loading fails the service still
/// comes up and reports `ModelUnavailable` on every prediction attempt,
/// carrying the load failure as the reason.
pub struct PredictionService {
    model: Option<Arc<ModelArtifact>>,
    load_error: Option<String>,
    max_message_len: usize,
}

impl PredictionService {
    /// Build the service from a persisted artifact directory.
    pub fn from_artifact_dir(dir: &Path, max_message_len: usize) -> Self {
        match ModelArtifact::load(dir) {
            Ok(artifact) => {
                info!(
                    vocabulary = artifact.vectorizer.vocabulary_size(),
                    corpus_size = artifact.corpus_size,
                    trained_at = %artifact.trained_at,
                    "model artifact loaded from {}",
                    dir.display()
                );
                Self {
                    model: Some(Arc::new(artifact)),
                    load_error: None,
                    max_message_len,
                }
            }
            Err(e) => {
                warn!("model artifact rejected, serving degraded: {e}");
                Self {
                    model: None,
                    load_error: Some(e.to_string()),
                    max_message_len,
                }
            }
        }
    }

    /// Build the service around an already-loaded artifact.
    pub fn from_artifact(artifact: ModelArtifact, max_message_len: usize) -> Self {
        Self {
            model: Some(Arc::new(artifact)),
            load_error: None,
            max_message_len,
        }
    }

    /// Whether a model is loaded and predictions can succeed.
    pub fn ready(&self) -> bool {
        self.model.is_some()
    }

    /// Classify one message.
    ///
    /// A single deterministic computation: it either fully succeeds or
    /// fails outright, with no retries and no partial results.
    pub fn predict(&self, text: &str) -> SieveResult<PredictionResult> {
        if text.trim().is_empty() {
            return Err(SieveError::validation("message", "is required"));
        }
        if text.len() > self.max_message_len {
            return Err(SieveError::validation(
                "message",
                format!("exceeds maximum length of {} bytes", self.max_message_len),
            ));
        }

        let model = self.model.as_ref().ok_or_else(|| {
            SieveError::model_unavailable(
                self.load_error
                    .clone()
                    .unwrap_or_else(|| "no model loaded".to_string()),
            )
        })?;

        let features = model.vectorizer.transform(text);
        let prediction = model.classifier.predict(&features)?;
        let keywords = extract_keywords(text);

        debug!(
            label = %prediction.label,
            confidence = prediction.confidence,
            keywords = keywords.len(),
            "message classified"
        );

        Ok(PredictionResult {
            label: prediction.label,
            confidence: prediction.confidence,
            keywords,
        })
    }
}
