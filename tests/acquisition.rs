use std::sync::Arc;

use burn::{
    backend::{Autodiff, NdArray},
    config::Config as _,
};
use burn_sentiment::{
    models::pooled_embedding,
    pipelines::sentiment_analysis::{
        acquire,
        inference::{load, LoadError},
        training::save,
        Classifier, Codec, Sentiment, Training, Vocabulary,
    },
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

type B = Autodiff<NdArray>;
type M = pooled_embedding::Model<B>;

fn model_config() -> pooled_embedding::Config {
    pooled_embedding::Config::new()
        .with_vocab_size(32)
        .with_embedding_size(4)
        .with_hidden_size(4)
}

fn untrained() -> (M, pooled_embedding::Config) {
    let config = model_config();

    (config.init(&Default::default()), config)
}

fn saved_model(dir: &TempDir) -> M {
    let (model, config) = untrained();
    let training = Training::new().with_artifact_dir(artifact_dir(dir));

    save::<B, M>(&model, &config, &training).unwrap();

    model
}

fn artifact_dir(dir: &TempDir) -> String {
    dir.path().display().to_string()
}

fn codec() -> Codec {
    Codec::new(Arc::new(Vocabulary::from_word_index([
        ("this", 11),
        ("movie", 17),
        ("was", 13),
        ("great", 20),
    ])))
}

#[test]
fn load_reports_missing_artifacts() {
    let dir = TempDir::new().unwrap();

    let result = load::<B, M>(&artifact_dir(&dir), &Default::default());

    assert!(matches!(result, Err(LoadError::Config(_))));
}

#[tokio::test]
async fn missing_artifacts_fall_back_to_training() {
    let dir = TempDir::new().unwrap();

    let acquired = acquire::<B, M, _, _>(&artifact_dir(&dir), &Default::default(), || async {
        Ok(untrained())
    })
    .await
    .unwrap();

    assert!(!acquired.is_restored());
}

#[tokio::test]
async fn saved_model_is_restored_without_fallback() {
    let dir = TempDir::new().unwrap();
    let saved = saved_model(&dir);

    let acquired = acquire::<B, M, _, _>(&artifact_dir(&dir), &Default::default(), || async {
        Err(anyhow::anyhow!("the fallback should not run"))
    })
    .await
    .unwrap();

    assert!(acquired.is_restored());

    let (restored, config) = acquired.into_parts();
    assert_eq!(config.vocab_size, 32);

    let encoded = vec![codec().encode_line("This movie was great")];
    let before = Classifier::new(saved, &config, codec(), Default::default());
    let after = Classifier::new(restored, &config, codec(), Default::default());

    let before = before.predict(encoded.clone());
    let after = after.predict(encoded);

    // Weights are stored in half precision
    assert!((before[0] - after[0]).abs() < 1e-2, "{before:?} vs {after:?}");
}

#[tokio::test]
async fn corrupt_weights_fall_back_to_training() {
    let dir = TempDir::new().unwrap();
    saved_model(&dir);

    std::fs::write(dir.path().join("model.mpk"), b"not a model").unwrap();

    let acquired = acquire::<B, M, _, _>(&artifact_dir(&dir), &Default::default(), || async {
        Ok(untrained())
    })
    .await
    .unwrap();

    assert!(!acquired.is_restored());
}

#[test]
fn load_rejects_weights_that_disagree_with_the_config() {
    let dir = TempDir::new().unwrap();
    saved_model(&dir);

    model_config()
        .with_vocab_size(64)
        .save(dir.path().join("config.json"))
        .unwrap();

    let result = load::<B, M>(&artifact_dir(&dir), &Default::default());

    assert!(matches!(result, Err(LoadError::Record(_))));
}

#[tokio::test]
async fn mismatched_vocab_size_falls_back_to_training() {
    let dir = TempDir::new().unwrap();
    saved_model(&dir);

    model_config()
        .with_vocab_size(64)
        .save(dir.path().join("config.json"))
        .unwrap();

    let acquired = acquire::<B, M, _, _>(&artifact_dir(&dir), &Default::default(), || async {
        Ok(untrained())
    })
    .await
    .unwrap();

    assert!(!acquired.is_restored());
}

#[tokio::test]
async fn fallback_errors_are_reported() {
    let dir = TempDir::new().unwrap();

    let result = acquire::<B, M, _, _>(&artifact_dir(&dir), &Default::default(), || async {
        Err(anyhow::anyhow!("no dataset"))
    })
    .await;

    assert!(result.is_err());
}

#[test]
fn every_line_gets_a_review() {
    let (model, config) = untrained();
    let classifier = Classifier::new(model, &config, codec(), Default::default());

    let lines = ["This movie was great!", "", "   ", "(An) \"odd\": film."];

    for line in lines {
        let review = classifier.classify(line);

        assert_eq!(review.line, line);
        assert_eq!(review.encoded.len(), 250);
        assert!(review.probability > 0.0 && review.probability < 1.0, "{line:?}");
        assert_ne!(review.sentiment, Sentiment::Unknown, "{line:?}");
    }
}

#[test]
fn rare_ids_do_not_break_prediction() {
    let (model, config) = untrained();
    let classifier = Classifier::new(model, &config, codec(), Default::default());

    let probabilities = classifier.predict(vec![vec![1, 31, 32, 88_000, 1_000_000]]);

    assert_eq!(probabilities.len(), 1);
    assert!((0.0..=1.0).contains(&probabilities[0]));
}
