//! Offline training pipeline: labeled TSV corpus in, versioned model
//! artifact out.

use anyhow::{bail, Context};
use clap::Parser;
use spamsieve::artifact::ModelArtifact;
use spamsieve::classifier::MultinomialNb;
use spamsieve::corpus::{load_tsv, train_test_split, TrainingExample};
use spamsieve::vectorizer::TfidfVectorizer;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Train the spamsieve model", long_about = None)]
struct Args {
    /// Labeled corpus in `label<TAB>message` TSV format.
    #[clap(short, long)]
    corpus: PathBuf,

    /// Directory to write model.json and model_manifest.json into.
    #[clap(short, long, default_value = "data/model")]
    output: PathBuf,

    /// Fraction of the corpus held out for evaluation.
    #[clap(long, default_value_t = 0.2)]
    test_fraction: f64,

    /// Additive smoothing constant.
    #[clap(long, default_value_t = 1.0)]
    alpha: f64,

    /// Shuffle seed for the train/test split.
    #[clap(long, default_value_t = 42)]
    seed: u64,
}

fn fit_on(examples: &[TrainingExample], alpha: f64) -> anyhow::Result<(TfidfVectorizer, MultinomialNb)> {
    let texts: Vec<String> = examples.iter().map(|e| e.text.clone()).collect();
    let labels: Vec<_> = examples.iter().map(|e| e.label).collect();

    let vectorizer = TfidfVectorizer::fit(&texts);
    if vectorizer.vocabulary_size() == 0 {
        bail!("training corpus produced an empty vocabulary");
    }

    let features: Vec<Vec<f64>> = texts.iter().map(|t| vectorizer.transform(t)).collect();
    let classifier =
        MultinomialNb::train(&features, &labels, alpha).context("classifier training failed")?;

    Ok((vectorizer, classifier))
}

fn evaluate(
    vectorizer: &TfidfVectorizer,
    classifier: &MultinomialNb,
    examples: &[TrainingExample],
) -> anyhow::Result<f64> {
    let mut correct = 0usize;
    for example in examples {
        let prediction = classifier.predict(&vectorizer.transform(&example.text))?;
        if prediction.label == example.label {
            correct += 1;
        }
    }
    Ok(correct as f64 / examples.len() as f64)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let examples = load_tsv(&args.corpus)
        .with_context(|| format!("loading corpus {}", args.corpus.display()))?;
    println!(
        "Loaded {} examples ({} spam, {} ham)",
        examples.len(),
        examples
            .iter()
            .filter(|e| e.label == spamsieve::label::Label::Spam)
            .count(),
        examples
            .iter()
            .filter(|e| e.label == spamsieve::label::Label::Ham)
            .count(),
    );

    let (train, test) = train_test_split(examples, args.test_fraction, args.seed)?;
    let (vectorizer, classifier) = fit_on(&train, args.alpha)?;

    let test_accuracy = if test.is_empty() {
        None
    } else {
        let accuracy = evaluate(&vectorizer, &classifier, &test)?;
        println!("Accuracy: {accuracy:.4} on {} held-out examples", test.len());
        Some(accuracy)
    };

    let corpus_size = train.len();
    let artifact = ModelArtifact::new(vectorizer, classifier, corpus_size, test_accuracy);
    let manifest = artifact.save(&args.output)?;

    println!("Model exported to: {}", args.output.display());
    println!("  vocabulary: {} terms", artifact.vectorizer.vocabulary_size());
    println!("  schema:     v{}", manifest.schema_version);
    println!("  sha256:     {}", manifest.sha256);

    Ok(())
}
