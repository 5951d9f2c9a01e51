use std::{fs, path::Path};

use burn::data::dataset::Dataset as _;
use burn_sentiment::{
    datasets::{imdb, DatasetError},
    pipelines::sentiment_analysis::vocabulary::{PAD, START, UNK},
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_dataset(root: &Path, word_index: &str) {
    let dir = root.join("imdb");
    fs::create_dir_all(&dir).unwrap();

    fs::write(dir.join("word_index.json"), word_index).unwrap();
    fs::write(dir.join("train.csv"), "label,tokens\n1,11 17 13 20\n0,1 90\n1,\n").unwrap();
    fs::write(dir.join("test.csv"), "label,tokens\n0,13 5\n").unwrap();
}

fn data_dir(dir: &TempDir) -> String {
    dir.path().display().to_string()
}

#[tokio::test]
async fn loads_both_splits_from_the_data_dir() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path(), r#"{"this": 11, "movie": 17}"#);

    let (train, test) = imdb::load_data(&data_dir(&dir), 32).await.unwrap();

    assert_eq!(train.len(), 3);
    assert_eq!(test.len(), 1);

    let first = train.get(0).unwrap();
    assert_eq!(first.label, 1);
    assert_eq!(&first.tokens[..6], &[START, 14, 20, 16, 23, PAD]);

    // 90 + 3 is outside a 32 word vocabulary
    assert_eq!(&train.get(1).unwrap().tokens[..3], &[START, 4, UNK]);
    assert_eq!(&train.get(2).unwrap().tokens[..2], &[START, PAD]);

    let review = test.get(0).unwrap();
    assert_eq!(review.label, 0);
    assert_eq!(review.tokens.len(), 250);
    assert_eq!(&review.tokens[..3], &[START, 16, 8]);
}

#[tokio::test]
async fn reads_the_word_index() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path(), r#"{"this": 11, "movie": 17}"#);

    let word_index = imdb::word_index(&data_dir(&dir)).await.unwrap();

    assert_eq!(word_index.len(), 2);
    assert_eq!(word_index["this"], 11);
    assert_eq!(word_index["movie"], 17);
}

#[tokio::test]
async fn malformed_word_index_is_an_error() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path(), r#"{"this": 11, "movie": "#);

    let result = imdb::word_index(&data_dir(&dir)).await;

    assert!(matches!(result, Err(DatasetError::Json(..))));
}

#[tokio::test]
async fn missing_dataset_files_are_an_error() {
    let dir = TempDir::new().unwrap();

    let result = imdb::load_data(&data_dir(&dir), 32).await;

    assert!(matches!(result, Err(DatasetError::Csv(..))));
}
