//! Word text selection.

use super::RandomSource;

/// Supplies target strings for spawned words.
pub trait WordSource {
    /// Picks a lowercase word with `min_len <= len <= max_len`.
    ///
    /// Implementations fall back to a word outside the range rather than
    /// failing; gameplay never stalls on a thin word list.
    fn pick_word(&self, rng: &mut dyn RandomSource, min_len: usize, max_len: usize) -> String;
}

/// In-memory word list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Used only when the list is empty.
    pub const FILLER: &'static str = "type";

    /// Builds a list, lowercasing entries and dropping empty or non-alphabetic ones.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty() && word.chars().all(|c| c.is_alphabetic()))
            .collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl WordSource for WordList {
    fn pick_word(&self, rng: &mut dyn RandomSource, min_len: usize, max_len: usize) -> String {
        if self.words.is_empty() {
            return Self::FILLER.to_string();
        }

        let fitting: Vec<&String> = self
            .words
            .iter()
            .filter(|word| {
                let len = word.chars().count();
                len >= min_len && len <= max_len
            })
            .collect();

        if fitting.is_empty() {
            self.words[rng.index(self.words.len())].clone()
        } else {
            fitting[rng.index(fitting.len())].clone()
        }
    }
}
