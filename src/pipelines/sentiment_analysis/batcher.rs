use burn::{
    data::dataloader,
    tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor},
};
use derive_new::new;

use crate::{pipelines::sentiment_analysis, utils::tensors::pad_to};

use super::Item;

/// An inference batch for sentiment analysis
#[derive(Debug, Clone, new)]
pub struct Infer<B: Backend> {
    /// Encoded reviews as 2D tensor: [batch_size, max_seq_length]
    pub tokens: Tensor<B, 2, Int>,
}

/// A training batch for sentiment analysis
#[derive(Clone, Debug, new)]
pub struct Train<B: Backend> {
    /// Model input
    pub input: Infer<B>,

    /// Binary labels for the batch
    pub targets: Tensor<B, 1, Int>,
}

/// Struct for batching encoded reviews
#[derive(Clone)]
pub struct Batcher<B: Backend> {
    /// Length of every sequence in a batch
    pub max_seq_length: usize,

    /// ID of the padding token
    pub pad_token_id: usize,

    /// ID of the UNK token
    pub unk_token_id: usize,

    /// Ids at or above this bound are replaced with the UNK token
    pub vocab_size: usize,

    /// Device on which to perform computation (e.g., CPU or CUDA device)
    pub device: B::Device,
}

impl<B: Backend> Batcher<B> {
    /// Creates a new batcher
    pub fn new(config: sentiment_analysis::Config, device: B::Device) -> Self {
        Self {
            max_seq_length: config.max_seq_length,
            pad_token_id: config.pad_token_id,
            unk_token_id: config.unk_token_id,
            vocab_size: config.vocab_size,
            device,
        }
    }

    /// Replace ids the embedding table cannot hold
    fn clamp(&self, tokens: &[usize]) -> Vec<usize> {
        tokens
            .iter()
            .map(|id| {
                if *id < self.vocab_size {
                    *id
                } else {
                    self.unk_token_id
                }
            })
            .collect()
    }
}

/// Implement Batcher trait for Batcher struct for inference
impl<B: Backend> dataloader::batcher::Batcher<Vec<usize>, Infer<B>> for Batcher<B> {
    /// Collects encoded reviews into an inference batch
    fn batch(&self, items: Vec<Vec<usize>>) -> Infer<B> {
        let tokens_list = items.iter().map(|tokens| self.clamp(tokens)).collect();

        Infer {
            tokens: pad_to(
                self.pad_token_id,
                tokens_list,
                self.max_seq_length,
                &self.device,
            ),
        }
    }
}

/// Implement Batcher trait for Batcher struct for training
impl<B: Backend, I: Item> dataloader::batcher::Batcher<I, Train<B>> for Batcher<B> {
    /// Collects labelled reviews into a training batch
    fn batch(&self, items: Vec<I>) -> Train<B> {
        let batch_size = items.len();

        let inputs = items.iter().map(|item| item.tokens().to_vec()).collect();
        let input: Infer<B> = self.batch(inputs);

        let labels: Data<B::IntElem, 1> = Data::new(
            items
                .iter()
                .map(|item| (item.label() as i64).elem())
                .collect(),
            Shape::new([batch_size]),
        );

        Train {
            input,
            targets: Tensor::from_data(labels, &self.device),
        }
    }
}
