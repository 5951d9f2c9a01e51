use std::collections::{BTreeMap, HashMap};

use crate::utils::maps::invert_map;

/// Padding token id
pub const PAD: usize = 0;

/// Start-of-review token id
pub const START: usize = 1;

/// Unknown word token id
pub const UNK: usize = 2;

/// Unused token id
pub const UNUSED: usize = 3;

/// Offset added to every raw dataset id to make room for the reserved tokens
pub const INDEX_FROM: usize = 3;

/// Returned by [`Vocabulary::decode_id`] for ids without a word
pub const UNKNOWN_WORD: &str = "?";

/// The reserved control tokens, in id order
pub static RESERVED: [(&str, usize); 4] = [
    ("<PAD>", PAD),
    ("<START>", START),
    ("<UNK>", UNK),
    ("<UNUSED>", UNUSED),
];

/// An immutable, bidirectional mapping between lowercase words and ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    word2id: HashMap<String, usize>,
    id2word: BTreeMap<usize, String>,
}

impl Vocabulary {
    /// Build the vocabulary from a raw dataset word index (word -> raw id).
    ///
    /// Raw ids are shifted by [`INDEX_FROM`] and the reserved tokens take ids 0-3. Reserved
    /// tokens win any collision, and when two words share an id the lexically smaller word
    /// keeps it, so that both directions always agree.
    pub fn from_word_index<I, S>(word_index: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut entries: Vec<(usize, String)> = word_index
            .into_iter()
            .filter_map(|(word, raw_id)| Some((raw_id.checked_add(INDEX_FROM)?, word.into())))
            .collect();

        entries.sort();

        let mut word2id: HashMap<String, usize> = RESERVED
            .iter()
            .map(|(word, id)| (word.to_string(), *id))
            .collect();

        let mut taken: Vec<usize> = RESERVED.iter().map(|(_, id)| *id).collect();

        for (id, word) in entries {
            if taken.last() == Some(&id) || id <= UNUSED || word2id.contains_key(&word) {
                log::debug!("Skipping colliding vocabulary entry {word:?} -> {id}");
                continue;
            }

            taken.push(id);
            word2id.insert(word, id);
        }

        let id2word = invert_map(word2id.clone());

        Self { word2id, id2word }
    }

    /// Look up the id for a word, case-insensitively. Absent words map to [`UNK`].
    pub fn encode_word(&self, word: &str) -> usize {
        self.word2id
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(UNK)
    }

    /// Look up the word for an id. Absent ids map to [`UNKNOWN_WORD`].
    pub fn decode_id(&self, id: usize) -> &str {
        self.id2word
            .get(&id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_WORD)
    }

    /// The number of entries, reserved tokens included
    pub fn len(&self) -> usize {
        self.word2id.len()
    }

    /// Always false, since the reserved tokens are present
    pub fn is_empty(&self) -> bool {
        self.word2id.is_empty()
    }
}
