//! Multinomial naive Bayes over TF-IDF features.
//!
//! Training estimates class priors and additively smoothed per-feature
//! likelihoods; inference works entirely in log space to avoid underflow.

use crate::errors::{SieveError, SieveResult};
use crate::label::Label;
use serde::{Deserialize, Serialize};

/// Parameters estimated for a single class.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClassParams {
    label: Label,
    log_prior: f64,
    feature_log_prob: Vec<f64>,
}

/// Result of classifying one feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: Label,
    /// Normalised posterior probability of the predicted class.
    pub confidence: f64,
}

/// Trained multinomial naive Bayes model. Immutable after training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    classes: Vec<ClassParams>,
    n_features: usize,
    alpha: f64,
}

impl MultinomialNb {
    /// Train on feature vectors with their labels.
    ///
    /// `alpha` is the additive smoothing constant; it must be positive so
    /// no feature ends up with zero probability. The corpus must contain
    /// at least one example of each class.
    pub fn train(features: &[Vec<f64>], labels: &[Label], alpha: f64) -> SieveResult<Self> {
        if features.is_empty() || features.len() != labels.len() {
            return Err(SieveError::training(format!(
                "corpus has {} feature rows for {} labels",
                features.len(),
                labels.len()
            )));
        }
        if alpha <= 0.0 {
            return Err(SieveError::training(format!(
                "smoothing alpha must be positive, got {alpha}"
            )));
        }

        let n_features = features[0].len();
        if features.iter().any(|row| row.len() != n_features) {
            return Err(SieveError::training(
                "feature rows have inconsistent widths",
            ));
        }

        let n_total = labels.len() as f64;
        let mut classes = Vec::with_capacity(2);

        for label in [Label::Ham, Label::Spam] {
            let rows: Vec<&Vec<f64>> = features
                .iter()
                .zip(labels)
                .filter(|(_, l)| **l == label)
                .map(|(f, _)| f)
                .collect();

            if rows.is_empty() {
                return Err(SieveError::training(format!(
                    "corpus contains no {label} examples"
                )));
            }

            let log_prior = (rows.len() as f64 / n_total).ln();

            let mut feature_sums = vec![0.0; n_features];
            for row in &rows {
                for (sum, value) in feature_sums.iter_mut().zip(row.iter()) {
                    *sum += value;
                }
            }

            let total: f64 = feature_sums.iter().sum();
            let denominator = total + alpha * n_features as f64;
            let feature_log_prob = feature_sums
                .iter()
                .map(|sum| ((sum + alpha) / denominator).ln())
                .collect();

            classes.push(ClassParams {
                label,
                log_prior,
                feature_log_prob,
            });
        }

        Ok(Self {
            classes,
            n_features,
            alpha,
        })
    }

    /// Classify a feature vector, returning the argmax class and its
    /// normalised posterior probability.
    pub fn predict(&self, features: &[f64]) -> SieveResult<Prediction> {
        if features.len() != self.n_features {
            return Err(SieveError::model_unavailable(format!(
                "feature vector has {} dimensions, model expects {}",
                features.len(),
                self.n_features
            )));
        }

        let joint_log_likelihood: Vec<f64> = self
            .classes
            .iter()
            .map(|class| {
                class.log_prior
                    + features
                        .iter()
                        .zip(&class.feature_log_prob)
                        .map(|(x, log_p)| x * log_p)
                        .sum::<f64>()
            })
            .collect();

        // log-sum-exp normalisation
        let max = joint_log_likelihood
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max
            + joint_log_likelihood
                .iter()
                .map(|jll| (jll - max).exp())
                .sum::<f64>()
                .ln();

        let (best_idx, best_jll) = joint_log_likelihood
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &v)| {
                if v > bv {
                    (i, v)
                } else {
                    (bi, bv)
                }
            });

        Ok(Prediction {
            label: self.classes[best_idx].label,
            confidence: (best_jll - log_norm).exp().clamp(0.0, 1.0),
        })
    }

    /// Width of the feature space the model was trained on.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Smoothing constant used at training time.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_model() -> MultinomialNb {
        // Two features: column 0 fires on spam, column 1 on ham.
        let features = vec![
            vec![1.0, 0.0],
            vec![0.9, 0.1],
            vec![0.0, 1.0],
            vec![0.1, 0.9],
        ];
        let labels = vec![Label::Spam, Label::Spam, Label::Ham, Label::Ham];
        MultinomialNb::train(&features, &labels, 1.0).unwrap()
    }

    #[test]
    fn separates_the_two_classes() {
        let model = toy_model();

        let spam = model.predict(&[1.0, 0.0]).unwrap();
        assert_eq!(spam.label, Label::Spam);
        assert!(spam.confidence > 0.5 && spam.confidence <= 1.0);

        let ham = model.predict(&[0.0, 1.0]).unwrap();
        assert_eq!(ham.label, Label::Ham);
        assert!(ham.confidence > 0.5 && ham.confidence <= 1.0);
    }

    #[test]
    fn prediction_is_idempotent() {
        let model = toy_model();
        let a = model.predict(&[0.7, 0.3]).unwrap();
        let b = model.predict(&[0.7, 0.3]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_mismatched_feature_width() {
        let model = toy_model();
        let err = model.predict(&[1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, SieveError::ModelUnavailable { .. }));
    }

    #[test]
    fn rejects_single_class_corpus() {
        let features = vec![vec![1.0, 0.0], vec![0.9, 0.1]];
        let labels = vec![Label::Spam, Label::Spam];
        let err = MultinomialNb::train(&features, &labels, 1.0).unwrap_err();
        assert!(matches!(err, SieveError::Training { .. }));
    }

    #[test]
    fn rejects_non_positive_alpha() {
        let features = vec![vec![1.0], vec![0.0]];
        let labels = vec![Label::Spam, Label::Ham];
        assert!(MultinomialNb::train(&features, &labels, 0.0).is_err());
    }

    #[test]
    fn zero_vector_falls_back_to_priors() {
        // Three spam, one ham: the empty message should lean spam via the prior.
        let features = vec![
            vec![1.0, 0.0],
            vec![0.8, 0.2],
            vec![0.9, 0.1],
            vec![0.0, 1.0],
        ];
        let labels = vec![Label::Spam, Label::Spam, Label::Spam, Label::Ham];
        let model = MultinomialNb::train(&features, &labels, 1.0).unwrap();

        let out = model.predict(&[0.0, 0.0]).unwrap();
        assert_eq!(out.label, Label::Spam);
        assert!((out.confidence - 0.75).abs() < 1e-9);
    }
}
