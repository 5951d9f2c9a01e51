use burn::{
    nn::{EmbeddingConfig, LinearConfig},
    tensor::{
        backend::{AutodiffBackend, Backend},
        Tensor,
    },
    train::ClassificationOutput,
};

use crate::pipelines::sentiment_analysis::{
    self,
    batcher::{Infer, Train},
    codec::MAX_SEQ_LENGTH,
    vocabulary::{PAD, UNK},
};

use super::Model;

/// The Model Configuration
#[derive(burn::config::Config)]
pub struct Config {
    /// Number of rows in the embedding table
    #[config(default = 88_000)]
    pub vocab_size: usize,

    /// Width of each word embedding
    #[config(default = 16)]
    pub embedding_size: usize,

    /// Width of the hidden dense layer
    #[config(default = 16)]
    pub hidden_size: usize,

    /// Length of every input sequence
    #[config(default = "MAX_SEQ_LENGTH")]
    pub max_seq_length: usize,
}

impl Config {
    /// Initialize the model
    pub fn init<B: Backend>(&self, device: &B::Device) -> Model<B> {
        Model {
            embedding: EmbeddingConfig::new(self.vocab_size, self.embedding_size).init(device),
            hidden: LinearConfig::new(self.embedding_size, self.hidden_size).init(device),
            output: LinearConfig::new(self.hidden_size, 1).init(device),
        }
    }
}

impl sentiment_analysis::ModelConfig for Config {
    fn get_config(&self) -> sentiment_analysis::Config {
        sentiment_analysis::Config {
            pad_token_id: PAD,
            unk_token_id: UNK,
            vocab_size: self.vocab_size,
            max_seq_length: self.max_seq_length,
        }
    }
}

impl<B: AutodiffBackend> sentiment_analysis::Model<B> for Model<B> {
    type Config = Config;

    fn init(config: &Self::Config, device: &B::Device) -> Self {
        config.init(device)
    }

    fn forward(&self, item: Train<B>) -> ClassificationOutput<B> {
        self.forward(item)
    }

    fn infer(&self, input: Infer<B>) -> Tensor<B, 1> {
        self.infer(input)
    }

    fn validate(&self, config: &Self::Config) -> Result<(), String> {
        let expected = [
            [config.vocab_size, config.embedding_size],
            [config.embedding_size, config.hidden_size],
            [config.hidden_size, 1],
        ];

        let found = self.shapes();

        if found == expected {
            Ok(())
        } else {
            Err(format!(
                "weight shapes {:?} do not match the config, expected {:?}",
                found, expected
            ))
        }
    }
}
