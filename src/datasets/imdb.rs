use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use burn::data::dataset::{self, InMemDataset};
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::pipelines::sentiment_analysis::{
    self,
    codec::{fixed_length, MAX_SEQ_LENGTH},
    vocabulary::{INDEX_FROM, START, UNK},
};

use super::{DatasetError, LoadableDataset};

/// The name of the IMDB dataset
pub static DATASET: &str = "imdb";

/// The word index file, mapping lowercase words to raw ranks
pub static WORD_INDEX_FILE: &str = "word_index.json";

/// A labelled, encoded movie review
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Item {
    /// Encoded review, exactly [`MAX_SEQ_LENGTH`] ids
    pub tokens: Vec<usize>,

    /// 1 for a positive review, 0 for a negative one
    pub label: usize,
}

impl sentiment_analysis::Item for Item {
    fn tokens(&self) -> &[usize] {
        &self.tokens
    }

    fn label(&self) -> usize {
        self.label
    }
}

/// A row of the raw CSV files
#[derive(Debug, Deserialize)]
struct Row {
    label: usize,
    tokens: String,
}

/// Struct for the IMDB dataset
pub struct Dataset {
    /// Underlying In-Memory dataset
    dataset: InMemDataset<Item>,
}

/// Implement the Dataset trait for the IMDB dataset
impl dataset::Dataset<Item> for Dataset {
    /// Returns a specific item from the dataset
    fn get(&self, index: usize) -> Option<Item> {
        self.dataset.get(index)
    }

    /// Returns the length of the dataset
    fn len(&self) -> usize {
        self.dataset.len()
    }
}

#[async_trait]
impl LoadableDataset<Item> for Dataset {
    async fn load(data_dir: &str, mode: &str, num_words: usize) -> Result<Self, DatasetError> {
        let path = dataset_dir(data_dir).join(format!("{mode}.csv"));

        tokio::task::spawn_blocking(move || Dataset::from_csv(&path, num_words))
            .await
            .map_err(|e| DatasetError::Io(std::io::Error::other(e)))?
    }
}

impl Dataset {
    /// Wrap already encoded items
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            dataset: InMemDataset::new(items),
        }
    }

    /// Read a CSV file of `label,tokens` rows holding raw word ranks, keeping file order
    pub fn from_csv(path: &Path, num_words: usize) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DatasetError::Csv(path.display().to_string(), e))?;

        let mut items = Vec::new();

        for (row_index, row) in reader.deserialize::<Row>().enumerate() {
            let row = row.map_err(|e| DatasetError::Csv(path.display().to_string(), e))?;

            if row.label > 1 {
                return Err(DatasetError::Label(row_index, row.label));
            }

            let raw = row
                .tokens
                .split_whitespace()
                .map(|token| {
                    token
                        .parse::<usize>()
                        .map_err(|_| DatasetError::Token(row_index, token.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;

            items.push(Item::new(shift_raw_ids(&raw, num_words), row.label));
        }

        log::info!("Loaded {} reviews from {}", items.len(), path.display());

        Ok(Self::from_items(items))
    }
}

/// Turn raw word ranks into vocabulary ids: prepend `<START>`, shift past the reserved ids,
/// replace ids at or above `num_words` with `<UNK>`, then fix the length.
pub fn shift_raw_ids(raw: &[usize], num_words: usize) -> Vec<usize> {
    let shifted = raw.iter().map(|rank| {
        rank.checked_add(INDEX_FROM)
            .filter(|id| *id < num_words)
            .unwrap_or(UNK)
    });

    let ids = std::iter::once(START).chain(shifted).collect();

    fixed_length(ids, MAX_SEQ_LENGTH)
}

/// The directory holding the IMDB files
pub fn dataset_dir(data_dir: &str) -> PathBuf {
    Path::new(data_dir).join(DATASET)
}

/// Load the raw word index (word -> raw rank)
pub async fn word_index(data_dir: &str) -> Result<HashMap<String, usize>, DatasetError> {
    let path = dataset_dir(data_dir).join(WORD_INDEX_FILE);

    let contents = tokio::fs::read_to_string(&path).await?;

    serde_json::from_str(&contents).map_err(|e| DatasetError::Json(path.display().to_string(), e))
}

/// Load the training and test datasets. `num_words` should be the model's vocabulary size.
pub async fn load_data(
    data_dir: &str,
    num_words: usize,
) -> Result<(Dataset, Dataset), DatasetError> {
    let train = Dataset::load(data_dir, "train", num_words).await?;
    let test = Dataset::load(data_dir, "test", num_words).await?;

    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use burn::data::dataset::Dataset as _;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pipelines::sentiment_analysis::vocabulary::PAD;

    const NUM_WORDS: usize = 88_000;

    #[test]
    fn shift_raw_ids_prepends_start_and_offsets() {
        let ids = shift_raw_ids(&[1, 14, 22], NUM_WORDS);

        assert_eq!(&ids[..5], &[START, 4, 17, 25, PAD]);
        assert_eq!(ids.len(), MAX_SEQ_LENGTH);
    }

    #[test]
    fn shift_raw_ids_caps_rare_words() {
        let ids = shift_raw_ids(&[5, 96, 97, 5000], 100);

        assert_eq!(&ids[..5], &[START, 8, 99, UNK, UNK]);
    }

    #[test]
    fn shift_raw_ids_treats_huge_ranks_as_unknown() {
        let ids = shift_raw_ids(&[usize::MAX, usize::MAX - 1, 7], NUM_WORDS);

        assert_eq!(&ids[..5], &[START, UNK, UNK, 10, PAD]);
    }

    #[test]
    fn from_csv_keeps_order_and_labels() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "label,tokens").unwrap();
        writeln!(file, "1,1 14 22").unwrap();
        writeln!(file, "0,").unwrap();
        writeln!(file, "1,9").unwrap();

        let dataset = Dataset::from_csv(file.path(), NUM_WORDS).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.get(0).unwrap().label, 1);
        assert_eq!(&dataset.get(0).unwrap().tokens[..4], &[START, 4, 17, 25]);
        assert_eq!(&dataset.get(1).unwrap().tokens[..2], &[START, PAD]);
        assert_eq!(dataset.get(2).unwrap().tokens[1], 12);
    }

    #[test]
    fn from_csv_rejects_bad_labels() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "label,tokens").unwrap();
        writeln!(file, "3,1 2").unwrap();

        let result = Dataset::from_csv(file.path(), NUM_WORDS);

        assert!(matches!(result, Err(DatasetError::Label(0, 3))));
    }

    #[test]
    fn from_csv_rejects_bad_tokens() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "label,tokens").unwrap();
        writeln!(file, "0,1 two").unwrap();

        let result = Dataset::from_csv(file.path(), NUM_WORDS);

        assert!(matches!(result, Err(DatasetError::Token(0, token)) if token == "two"));
    }
}
