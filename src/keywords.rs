//! Spam-indicative keyword hints attached to prediction responses.
//!
//! Purely explanatory metadata: the fixed list and constant score are a
//! cosmetic heuristic and play no part in the classifier decision.

use serde::{Deserialize, Serialize};

const SPAM_KEYWORDS: [&str; 5] = ["win", "free", "prize", "claim", "urgent"];

const KEYWORD_SCORE: f64 = 0.9;

/// A keyword found in the input, with its heuristic score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordHit {
    pub word: String,
    pub score: f64,
}

/// Match the fixed keyword set against the lower-cased input.
pub fn extract_keywords(message: &str) -> Vec<KeywordHit> {
    let lowered = message.to_lowercase();
    SPAM_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .map(|keyword| KeywordHit {
            word: keyword.to_string(),
            score: KEYWORD_SCORE,
        })
        .collect()
}
