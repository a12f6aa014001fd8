//! Persisted model artifact and its integrity manifest.
//!
//! The trainer writes `model.json` plus a `model_manifest.json` carrying
//! the file's sha256 and the artifact schema version. Loading verifies
//! both before the model is ever allowed to classify anything: a corrupt
//! or incompatible artifact is a loud `ModelUnavailable`, never a silent
//! misclassification.

use crate::classifier::MultinomialNb;
use crate::errors::{SieveError, SieveResult};
use crate::vectorizer::TfidfVectorizer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Artifact schema understood by this build.
pub const SCHEMA_VERSION: u32 = 1;

pub const MODEL_FILE: &str = "model.json";
pub const MANIFEST_FILE: &str = "model_manifest.json";

/// Trained model plus the fitted feature extractor, as persisted to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema_version: u32,
    pub trained_at: DateTime<Utc>,
    pub corpus_size: usize,
    /// Held-out accuracy reported by the trainer, when a test split existed.
    pub test_accuracy: Option<f64>,
    pub vectorizer: TfidfVectorizer,
    pub classifier: MultinomialNb,
}

/// Deployment manifest written next to the model file.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelManifest {
    pub model_file: String,
    pub sha256: String,
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

impl ModelArtifact {
    pub fn new(
        vectorizer: TfidfVectorizer,
        classifier: MultinomialNb,
        corpus_size: usize,
        test_accuracy: Option<f64>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            trained_at: Utc::now(),
            corpus_size,
            test_accuracy,
            vectorizer,
            classifier,
        }
    }

    /// Write the artifact and its manifest into `dir`, creating it if
    /// needed. Returns the manifest.
    pub fn save(&self, dir: &Path) -> SieveResult<ModelManifest> {
        fs::create_dir_all(dir)
            .map_err(|e| SieveError::io(format!("creating {}", dir.display()), e))?;

        let model_path = dir.join(MODEL_FILE);
        let model_json = serde_json::to_vec_pretty(self)
            .map_err(|e| SieveError::serialization("model artifact", e))?;
        fs::write(&model_path, &model_json)
            .map_err(|e| SieveError::io(format!("writing {}", model_path.display()), e))?;

        let manifest = ModelManifest {
            model_file: MODEL_FILE.to_string(),
            sha256: sha256_hex(&model_json),
            schema_version: self.schema_version,
            created_at: Utc::now(),
        };

        let manifest_path = dir.join(MANIFEST_FILE);
        let manifest_json = serde_json::to_vec_pretty(&manifest)
            .map_err(|e| SieveError::serialization("model manifest", e))?;
        fs::write(&manifest_path, manifest_json)
            .map_err(|e| SieveError::io(format!("writing {}", manifest_path.display()), e))?;

        Ok(manifest)
    }

    /// Load and verify an artifact from `dir`.
    ///
    /// Every failure path maps to `ModelUnavailable` so callers can report
    /// one consistent condition for a missing, corrupt, or incompatible
    /// model.
    pub fn load(dir: &Path) -> SieveResult<Self> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let manifest_bytes = fs::read(&manifest_path).map_err(|e| {
            SieveError::model_unavailable(format!(
                "manifest {} unreadable: {e}",
                manifest_path.display()
            ))
        })?;
        let manifest: ModelManifest = serde_json::from_slice(&manifest_bytes).map_err(|e| {
            SieveError::model_unavailable(format!(
                "manifest {} invalid: {e}",
                manifest_path.display()
            ))
        })?;

        if manifest.schema_version != SCHEMA_VERSION {
            return Err(SieveError::model_unavailable(format!(
                "artifact schema version {} unsupported (expected {})",
                manifest.schema_version, SCHEMA_VERSION
            )));
        }

        let model_path = dir.join(&manifest.model_file);
        let model_bytes = fs::read(&model_path).map_err(|e| {
            SieveError::model_unavailable(format!(
                "model file {} unreadable: {e}",
                model_path.display()
            ))
        })?;

        let digest = sha256_hex(&model_bytes);
        if digest != manifest.sha256 {
            return Err(SieveError::model_unavailable(format!(
                "model file {} checksum mismatch: manifest {}, actual {}",
                model_path.display(),
                manifest.sha256,
                digest
            )));
        }

        let artifact: ModelArtifact = serde_json::from_slice(&model_bytes).map_err(|e| {
            SieveError::model_unavailable(format!("model file {} invalid: {e}", model_path.display()))
        })?;

        if artifact.schema_version != SCHEMA_VERSION {
            return Err(SieveError::model_unavailable(format!(
                "model schema version {} unsupported (expected {})",
                artifact.schema_version, SCHEMA_VERSION
            )));
        }

        if artifact.vectorizer.vocabulary_size() != artifact.classifier.n_features() {
            return Err(SieveError::model_unavailable(format!(
                "vectorizer vocabulary ({}) does not match classifier feature space ({})",
                artifact.vectorizer.vocabulary_size(),
                artifact.classifier.n_features()
            )));
        }

        Ok(artifact)
    }
}
