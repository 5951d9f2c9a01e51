use std::sync::Arc;

use derive_new::new;

use super::vocabulary::{Vocabulary, PAD, START};

/// Every encoded review has exactly this many ids
pub const MAX_SEQ_LENGTH: usize = 250;

/// Characters deleted from a review line before it is split into tokens
pub const STRIPPED_CHARS: [char; 6] = [',', '.', '(', ')', ':', '"'];

/// Split a raw review line into tokens.
///
/// The stripped characters are deleted outright, surrounding whitespace is trimmed, and the
/// rest is split on single spaces. Runs of spaces produce empty tokens and an empty line
/// produces a single empty token.
pub fn normalize(line: &str) -> Vec<String> {
    let stripped: String = line.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect();

    stripped.trim().split(' ').map(str::to_string).collect()
}

/// Cut or right-pad a sequence of ids to exactly `max_seq_length` entries
pub fn fixed_length(mut ids: Vec<usize>, max_seq_length: usize) -> Vec<usize> {
    ids.resize(max_seq_length, PAD);
    ids
}

/// Encodes token sequences into fixed-length id sequences and back
#[derive(Debug, Clone, new)]
pub struct Codec {
    /// The shared vocabulary
    vocabulary: Arc<Vocabulary>,

    /// Length of every encoded sequence
    #[new(value = "MAX_SEQ_LENGTH")]
    max_seq_length: usize,
}

impl Codec {
    /// Use a different fixed length
    pub fn with_max_seq_length(mut self, max_seq_length: usize) -> Self {
        self.max_seq_length = max_seq_length;
        self
    }

    /// Encode tokens as `<START>` followed by one id per token, fixed to the sequence length
    pub fn encode<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<usize> {
        let ids = std::iter::once(START)
            .chain(
                tokens
                    .iter()
                    .map(|token| self.vocabulary.encode_word(token.as_ref())),
            )
            .take(self.max_seq_length)
            .collect();

        fixed_length(ids, self.max_seq_length)
    }

    /// Normalize and encode a raw review line
    pub fn encode_line(&self, line: &str) -> Vec<usize> {
        self.encode(&normalize(line))
    }

    /// Render ids as space separated words, for diagnostics
    pub fn decode(&self, ids: &[usize]) -> String {
        ids.iter()
            .map(|id| self.vocabulary.decode_id(*id))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
