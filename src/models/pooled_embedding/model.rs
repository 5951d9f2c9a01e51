use burn::{
    module::Module,
    nn::{loss::BinaryCrossEntropyLossConfig, Embedding, Linear},
    tensor::{
        activation::{relu, sigmoid},
        backend::Backend,
        Int, Tensor,
    },
    train::ClassificationOutput,
};

use crate::pipelines::sentiment_analysis::batcher::{Infer, Train};

/// Averaged word embeddings feeding a small dense classifier
#[derive(Module, Debug)]
pub struct Model<B: Backend> {
    /// Word embeddings
    pub embedding: Embedding<B>,

    /// Hidden dense layer, ReLU activated
    pub hidden: Linear<B>,

    /// Single-unit output layer, sigmoid activated
    pub output: Linear<B>,
}

/// Define model behavior
impl<B: Backend> Model<B> {
    /// Map [batch_size, seq_length] ids to [batch_size] pre-sigmoid scores
    pub fn logits(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 1> {
        let [batch_size, _seq_length] = tokens.dims();

        // [batch_size, seq_length, embedding_size] -> [batch_size, embedding_size]
        let pooled = self
            .embedding
            .forward(tokens)
            .mean_dim(1)
            .squeeze::<2>(1);

        let hidden = relu(self.hidden.forward(pooled));

        self.output.forward(hidden).reshape([batch_size])
    }

    /// Defines forward pass for training
    pub fn forward(&self, item: Train<B>) -> ClassificationOutput<B> {
        classification(self.logits(item.input.tokens), item.targets)
    }

    /// Defines forward pass for inference
    pub fn infer(&self, input: Infer<B>) -> Tensor<B, 1> {
        sigmoid(self.logits(input.tokens))
    }

    /// Shapes of the embedding table, hidden weights and output weights
    pub fn shapes(&self) -> [[usize; 2]; 3] {
        [
            self.embedding.weight.dims(),
            self.hidden.weight.dims(),
            self.output.weight.dims(),
        ]
    }
}

/// Binary cross entropy on the logits, with a two-column `[1 - p, p]` output for accuracy.
///
/// The loss works on logits since the sigmoid saturates to exactly 0 or 1 in f32.
pub fn classification<B: Backend>(
    logits: Tensor<B, 1>,
    targets: Tensor<B, 1, Int>,
) -> ClassificationOutput<B> {
    let [batch_size] = logits.dims();
    let device = logits.device();

    let targets = targets.to_device(&device);

    let loss = BinaryCrossEntropyLossConfig::new()
        .with_logits(true)
        .init(&device)
        .forward(logits.clone(), targets.clone());

    // Two columns so that argmax picks the predicted class
    let positive = sigmoid(logits).reshape([batch_size, 1]);
    let negative = positive.clone().neg().add_scalar(1.0);
    let output = Tensor::cat(vec![negative, positive], 1);

    ClassificationOutput {
        loss,
        output,
        targets,
    }
}
