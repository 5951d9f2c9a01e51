use std::fmt::Display;

use burn::{
    module::AutodiffModule,
    tensor::{backend::AutodiffBackend, Tensor},
    train::{ClassificationOutput, TrainStep},
};

use super::{
    batcher::{Infer, Train},
    Config,
};

/// A trait for models that can be used for Sentiment Analysis
pub trait Model<B>:
    AutodiffModule<B> + TrainStep<Train<B>, ClassificationOutput<B>> + Display
where
    B: AutodiffBackend,
{
    /// The model configuration
    type Config: ModelConfig;

    /// Initialize a model with fresh weights
    fn init(config: &Self::Config, device: &B::Device) -> Self;

    /// Perform a forward pass, returning the loss and a two-column `[1 - p, p]` output
    fn forward(&self, item: Train<B>) -> ClassificationOutput<B>;

    /// Defines forward pass for inference, returning one probability per review
    fn infer(&self, input: Infer<B>) -> Tensor<B, 1>;

    /// Check that the weights have the shapes the configuration describes
    fn validate(&self, config: &Self::Config) -> Result<(), String>;
}

/// A trait for configs that can be used for Sentiment Analysis models
pub trait ModelConfig: burn::config::Config + Clone {
    /// Return the Config needed for the sentiment analysis pipeline
    fn get_config(&self) -> Config;
}
