/// Word to id mapping
pub mod vocabulary;

/// Review normalization and fixed-length encoding
pub mod codec;

/// Sentiment labels
pub mod label;

/// Sentiment Analysis Items
pub mod item;

/// Common model config and traits for sentiment analysis
pub mod model;

/// Batcher
pub mod batcher;

/// Pipeline and training configuration
pub mod config;

/// Training
pub mod training;

/// Inference
pub mod inference;

pub use batcher::Batcher;
pub use codec::Codec;
pub use config::{Config, Training};
pub use inference::{acquire, Acquired, Classifier, Review};
pub use item::Item;
pub use label::Sentiment;
pub use model::{Model, ModelConfig};
pub use training::{evaluate, train, Evaluation};
pub use vocabulary::Vocabulary;
