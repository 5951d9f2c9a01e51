use burn::LearningRate;

/// The common model configuration properties needed for the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The padding token ID
    pub pad_token_id: usize,

    /// The ID substituted for tokens the embedding cannot represent
    pub unk_token_id: usize,

    /// Number of rows in the embedding table
    pub vocab_size: usize,

    /// Length of every input sequence
    pub max_seq_length: usize,
}

/// Define configuration struct for the experiment
#[derive(burn::config::Config)]
pub struct Training {
    /// Batch size
    #[config(default = 512)]
    pub batch_size: usize,

    /// Number of epochs
    #[config(default = 40)]
    pub num_epochs: usize,

    /// Number of leading training examples held out for validation
    #[config(default = 10_000)]
    pub validation_size: usize,

    /// Initial learning rate
    #[config(default = 1e-3)]
    pub learning_rate: LearningRate,

    /// Seed for weight initialization and shuffling
    #[config(default = 42)]
    pub seed: u64,

    /// Data loader worker threads, defaulting to the available parallelism
    pub num_workers: Option<usize>,

    /// Whether to render training progress with the TUI
    #[config(default = true)]
    pub use_tui: bool,

    /// The location of the top-level data directory
    #[config(default = "\"data\".to_string()")]
    pub data_dir: String,

    /// The directory holding the persisted model
    #[config(default = "\"artifacts\".to_string()")]
    pub artifact_dir: String,
}
