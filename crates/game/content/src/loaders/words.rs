//! Word list loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use typing_core::WordList;

use crate::loaders::{LoadResult, read_file};

/// Word list structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordListFile {
    pub words: Vec<String>,
}

/// Loader for word lists from RON files.
pub struct WordLoader;

impl WordLoader {
    /// Load a word list from a RON file.
    ///
    /// Entries are normalized by [`WordList::new`]; an empty result is an
    /// error since every spawn would fall back to filler text.
    pub fn load(path: &Path) -> LoadResult<WordList> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid word list {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<WordList> {
        let file: WordListFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse word list RON: {}", e))?;
        let skipped = file.words.len();
        let list = WordList::new(file.words);
        if list.is_empty() {
            anyhow::bail!("word list contains no usable words");
        }
        if list.len() < skipped {
            tracing::warn!(skipped = skipped - list.len(), "dropped unusable words");
        }
        Ok(list)
    }
}
