use std::{fmt::Display, future::Future, path::Path};

use burn::{
    config::Config as _,
    data::dataloader::batcher::Batcher as _,
    module::Module,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};

use super::{
    batcher::Infer,
    training::{MODEL_CONFIG_FILE, MODEL_FILE},
    Batcher, Codec, Model, ModelConfig, Sentiment,
};

/// A persisted model that cannot be restored, for any reason
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// The model configuration is missing or malformed
    #[error("unable to load model config: {0}")]
    Config(String),

    /// The model weights are missing or malformed
    #[error("unable to load trained model weights: {0}")]
    Record(String),
}

/// Restore a model and its configuration from the artifact directory
pub fn load<B, M>(artifact_dir: &str, device: &B::Device) -> Result<(M, M::Config), LoadError>
where
    B: AutodiffBackend,
    M: Model<B>,
{
    let artifact_dir = Path::new(artifact_dir);

    let config = M::Config::load(artifact_dir.join(MODEL_CONFIG_FILE))
        .map_err(|e| LoadError::Config(e.to_string()))?;

    let record = CompactRecorder::new()
        .load(artifact_dir.join(MODEL_FILE), device)
        .map_err(|e| LoadError::Record(e.to_string()))?;

    let model = M::init(&config, device).load_record(record);

    model.validate(&config).map_err(LoadError::Record)?;

    Ok((model, config))
}

/// How a model was acquired
pub enum Acquired<M, C> {
    /// Restored from the artifact directory
    Restored(M, C),

    /// Produced by the fallback after the restore failed
    Trained(M, C),
}

impl<M, C> Acquired<M, C> {
    /// Whether the model came from the artifact directory
    pub fn is_restored(&self) -> bool {
        matches!(self, Acquired::Restored(..))
    }

    /// Take the model and its configuration
    pub fn into_parts(self) -> (M, C) {
        match self {
            Acquired::Restored(model, config) | Acquired::Trained(model, config) => {
                (model, config)
            }
        }
    }
}

/// Restore the persisted model, or run `fallback` to produce one if it cannot be loaded
pub async fn acquire<B, M, F, Fut>(
    artifact_dir: &str,
    device: &B::Device,
    fallback: F,
) -> anyhow::Result<Acquired<M, M::Config>>
where
    B: AutodiffBackend,
    M: Model<B>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<(M, M::Config)>>,
{
    match load::<B, M>(artifact_dir, device) {
        Ok((model, config)) => {
            log::info!("Loaded model from {}", artifact_dir);

            Ok(Acquired::Restored(model, config))
        }
        Err(err) => {
            log::warn!("{}, training a new model", err);

            let (model, config) = fallback().await?;

            Ok(Acquired::Trained(model, config))
        }
    }
}

/// The classification of a single review line
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// The original line
    pub line: String,

    /// The encoded line
    pub encoded: Vec<usize>,

    /// The predicted probability of a positive review
    pub probability: f64,

    /// The sentiment for the probability
    pub sentiment: Sentiment,
}

impl Review {
    /// The probability rounded to two decimals, for display
    pub fn rounded_probability(&self) -> f64 {
        (self.probability * 100.0).round() / 100.0
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoded = self
            .encoded
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        write!(
            f,
            "{}\n[{}]\n{}\n{:.2}",
            self.line,
            encoded,
            self.sentiment.message(),
            self.rounded_probability()
        )
    }
}

/// Applies a trained model to raw review lines
pub struct Classifier<B: AutodiffBackend, M: Model<B>> {
    model: M,
    codec: Codec,
    batcher: Batcher<B>,
}

impl<B, M> Classifier<B, M>
where
    B: AutodiffBackend,
    M: Model<B>,
{
    /// Create a classifier for a model and its configuration
    pub fn new(model: M, config: &M::Config, codec: Codec, device: B::Device) -> Self {
        let batcher = Batcher::new(config.get_config(), device);

        Self {
            model,
            codec,
            batcher,
        }
    }

    /// The codec used to encode lines
    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Predict one probability per encoded review
    pub fn predict(&self, encoded: Vec<Vec<usize>>) -> Vec<f64> {
        let input: Infer<B> = self.batcher.batch(encoded);

        self.model
            .infer(input)
            .into_data()
            .convert::<f64>()
            .value
    }

    /// Normalize, encode, predict and label one review line
    pub fn classify(&self, line: &str) -> Review {
        let encoded = self.codec.encode_line(line);

        let probability = self
            .predict(vec![encoded.clone()])
            .first()
            .copied()
            .unwrap_or(f64::NAN);

        Review {
            line: line.to_string(),
            encoded,
            probability,
            sentiment: Sentiment::from_probability(probability),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn review(probability: f64) -> Review {
        Review {
            line: "Great fun".to_string(),
            encoded: vec![1, 2, 0],
            probability,
            sentiment: Sentiment::from_probability(probability),
        }
    }

    #[test]
    fn rounds_for_display() {
        assert_eq!(review(0.6789).rounded_probability(), 0.68);
        assert_eq!(review(0.004).rounded_probability(), 0.0);
    }

    #[test]
    fn display_lists_line_sequence_message_and_probability() {
        assert_eq!(
            review(0.8123).to_string(),
            "Great fun\n[1 2 0]\nThis review is excellent!\n0.81"
        );
    }

    #[test]
    fn small_probabilities_keep_their_label_when_rounded_to_zero() {
        let review = review(0.004);

        assert_eq!(review.sentiment, Sentiment::VeryBad);
        assert_eq!(review.to_string().lines().last(), Some("0.00"));
    }
}
