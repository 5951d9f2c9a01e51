use async_trait::async_trait;

///  The IMDB movie review dataset
pub mod imdb;

/// A dataset which can be loaded
#[async_trait]
pub trait LoadableDataset<I>: burn::data::dataset::Dataset<I> {
    /// Load the dataset, keeping only word ids below `num_words`
    async fn load(data_dir: &str, mode: &str, num_words: usize) -> Result<Self, DatasetError>
    where
        Self: std::marker::Sized;
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The dataset files could not be read
    #[error("unable to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// A CSV file is malformed
    #[error("malformed dataset file {0}: {1}")]
    Csv(String, #[source] csv::Error),

    /// A JSON file is malformed
    #[error("malformed dataset file {0}: {1}")]
    Json(String, #[source] serde_json::Error),

    /// A label other than 0 or 1
    #[error("row {0}: label must be 0 or 1, found {1}")]
    Label(usize, usize),

    /// A token that is not a word rank
    #[error("row {0}: token {1:?} is not a word rank")]
    Token(usize, String),
}
