//! Labeled training corpus loading and splitting.
//!
//! Corpus files use the SMS-collection TSV layout: one `label<TAB>message`
//! row per example, no header, labels `ham` or `spam`.

use crate::errors::{SieveError, SieveResult};
use crate::label::Label;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::Path;

/// One labeled training example. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub text: String,
    pub label: Label,
}

/// Load a TSV corpus from disk.
pub fn load_tsv(path: &Path) -> SieveResult<Vec<TrainingExample>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(false)
        .from_path(path)
        .map_err(|e| SieveError::training(format!("failed to open corpus {}: {e}", path.display())))?;

    let mut examples = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| SieveError::training(format!("corpus row {}: {e}", line + 1)))?;
        if record.len() != 2 {
            return Err(SieveError::training(format!(
                "corpus row {}: expected 2 columns, got {}",
                line + 1,
                record.len()
            )));
        }

        let label: Label = record[0].parse().map_err(|_| {
            SieveError::training(format!(
                "corpus row {}: unknown label '{}'",
                line + 1,
                &record[0]
            ))
        })?;

        examples.push(TrainingExample {
            text: record[1].to_string(),
            label,
        });
    }

    if examples.is_empty() {
        return Err(SieveError::training(format!(
            "corpus {} contains no examples",
            path.display()
        )));
    }

    Ok(examples)
}

/// Seeded shuffle followed by a train/test split.
///
/// `test_fraction` must be in [0, 1); the test partition may be empty for
/// tiny corpora, the training partition never is.
pub fn train_test_split(
    mut examples: Vec<TrainingExample>,
    test_fraction: f64,
    seed: u64,
) -> SieveResult<(Vec<TrainingExample>, Vec<TrainingExample>)> {
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(SieveError::training(format!(
            "test fraction must be in [0, 1), got {test_fraction}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    examples.shuffle(&mut rng);

    let n_test = (examples.len() as f64 * test_fraction).floor() as usize;
    let train = examples.split_off(n_test);
    Ok((train, examples))
}
