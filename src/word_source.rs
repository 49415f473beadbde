use std::fs;
use std::path::Path;

use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::from_str;

use crate::error::{Result, TyperError};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// Word lists compiled into the binary
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    English,
    Rust,
}

impl SupportedLanguage {
    pub fn file_stem(&self) -> String {
        self.to_string().to_lowercase()
    }

    pub fn load(&self) -> Result<WordSource> {
        WordSource::embedded(&self.file_stem())
    }
}

#[derive(Deserialize, Clone, Debug)]
struct WordList {
    name: String,
    #[allow(dead_code)]
    size: u32,
    words: Vec<String>,
}

/// The full, immutable list of candidate words a session slices windows from.
///
/// Positions past the end of the list wrap around to the start, so any window
/// of any size is always full. An empty list can't be constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct WordSource {
    name: String,
    words: Vec<String>,
}

impl WordSource {
    /// Build a source from raw entries. Entries are split on whitespace since a
    /// space always submits the current word and could never be typed inside one.
    pub fn new<S: Into<String>>(name: S, words: Vec<String>) -> Result<Self> {
        let words: Vec<String> = words
            .iter()
            .flat_map(|w| w.split_whitespace())
            .map(str::to_owned)
            .collect();

        if words.is_empty() {
            return Err(TyperError::EmptyWordList);
        }

        Ok(Self {
            name: name.into(),
            words,
        })
    }

    /// Load one of the lists bundled under `src/lang`
    pub fn embedded(file_stem: &str) -> Result<Self> {
        let file = LANG_DIR
            .get_file(format!("{file_stem}.json"))
            .ok_or_else(|| TyperError::UnknownLanguage(file_stem.to_owned()))?;

        let contents = file
            .contents_utf8()
            .ok_or_else(|| TyperError::InvalidEncoding(file_stem.to_owned()))?;

        let list: WordList = from_str(contents)?;
        Self::new(list.name, list.words)
    }

    /// Load whitespace-separated words from a plain text file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_owned());
        Self::from_text(name, &text)
    }

    pub fn from_text<S: Into<String>>(name: S, text: &str) -> Result<Self> {
        Self::new(name, text.split_whitespace().map(str::to_owned).collect())
    }

    pub fn shuffled<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.words.shuffle(rng);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at a global position, wrapping past the end of the list
    pub fn word_at(&self, position: usize) -> &str {
        &self.words[position % self.words.len()]
    }

    /// The `index`-th non-overlapping window of `size` words
    pub fn window(&self, index: usize, size: usize) -> Vec<String> {
        let start = index * size;
        (start..start + size)
            .map(|pos| self.word_at(pos).to_owned())
            .collect()
    }
}
