//! `dictionary`: load and validate the categorized word dictionary
//!
//! The dictionary is a JSON object mapping a category name to an ordered array
//! of entries:
//!
//! ```json
//! { "Космос": [ { "word": "орбита", "clue": "Путь спутника", "hint": "О..." } ] }
//! ```
//!
//! Loading is strict. Every word is normalized (see
//! [`normalize_word`](crate::alphabet::normalize_word)) and then checked
//! against the alphabet and the global length bounds. The first problem aborts
//! the load with a [`DictionaryError`]; nothing is silently dropped. Use
//! [`Dictionary::audit_json_str`] to collect every problem at once.
//!
//! Within a category, repeated words keep only their first entry.
//! Once loaded, the dictionary is read-only and can be shared between threads.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::alphabet::{first_foreign_char, letter_count, normalize_word, WORD_LENGTH_BOUNDS};
use crate::errors::DictionaryError;

/// Categories with fewer entries than this are listed as unavailable.
pub const MIN_CATEGORY_SIZE: usize = 50;

/// A single `{word, clue, hint}` entry, word already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub clue: String,
    #[serde(default)]
    pub hint: String,
}

impl WordEntry {
    #[must_use]
    pub fn new(word: &str, clue: &str, hint: &str) -> Self {
        Self {
            word: normalize_word(word),
            clue: clue.trim().to_string(),
            hint: hint.trim().to_string(),
        }
    }

    /// Word length in letters.
    #[must_use]
    pub fn len(&self) -> usize {
        letter_count(&self.word)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Check this entry against the alphabet and the global bounds.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, tagged with `category`.
    pub fn check(&self, category: &str) -> Result<(), DictionaryError> {
        if let Some(invalid_char) = first_foreign_char(&self.word) {
            return Err(DictionaryError::InvalidChar {
                category: category.to_string(),
                word: self.word.clone(),
                invalid_char,
            });
        }
        let len = self.len();
        if !WORD_LENGTH_BOUNDS.contains(&len) {
            return Err(DictionaryError::WordLength {
                category: category.to_string(),
                word: self.word.clone(),
                len,
                min: *WORD_LENGTH_BOUNDS.start(),
                max: *WORD_LENGTH_BOUNDS.end(),
            });
        }
        if self.clue.is_empty() {
            return Err(DictionaryError::EmptyClue {
                category: category.to_string(),
                word: self.word.clone(),
            });
        }
        Ok(())
    }
}

/// Length statistics for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub total_words: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub avg_length: f64,
}

/// Listing information for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub name: String,
    pub word_count: usize,
    pub available: bool,
}

/// Read-only, validated dictionary.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    categories: BTreeMap<String, Vec<WordEntry>>,
}

type RawDictionary = BTreeMap<String, Vec<WordEntry>>;

fn normalize_entries(raw: Vec<WordEntry>) -> Vec<WordEntry> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|e| WordEntry::new(&e.word, &e.clue, &e.hint))
        .filter(|e| seen.insert(e.word.clone()))
        .collect()
}

impl Dictionary {
    /// Parse and validate a dictionary from an in-memory JSON string.
    ///
    /// # Errors
    ///
    /// [`DictionaryError::Json`] on malformed input, otherwise the first entry problem.
    pub fn from_json_str(contents: &str) -> Result<Dictionary, DictionaryError> {
        let raw: RawDictionary = serde_json::from_str(contents)?;
        let mut categories = BTreeMap::new();
        for (name, entries) in raw {
            let entries = normalize_entries(entries);
            if entries.is_empty() {
                return Err(DictionaryError::EmptyCategory { category: name });
            }
            for entry in &entries {
                entry.check(&name)?;
            }
            categories.insert(name, entries);
        }
        Ok(Dictionary { categories })
    }

    /// Parse a dictionary and report every entry problem instead of stopping at the first.
    ///
    /// # Errors
    ///
    /// Only fails when the JSON itself cannot be parsed.
    pub fn audit_json_str(contents: &str) -> Result<Vec<DictionaryError>, DictionaryError> {
        let raw: RawDictionary = serde_json::from_str(contents)?;
        let mut problems = Vec::new();
        for (name, entries) in raw {
            let entries = normalize_entries(entries);
            if entries.is_empty() {
                problems.push(DictionaryError::EmptyCategory { category: name.clone() });
            }
            problems.extend(entries.iter().filter_map(|e| e.check(&name).err()));
        }
        Ok(problems)
    }

    /// Read a dictionary file and parse it.
    ///
    /// # Errors
    ///
    /// [`DictionaryError::Io`] if the file cannot be read, otherwise as [`Dictionary::from_json_str`].
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Dictionary, DictionaryError> {
        let data = read_dictionary_file(path.as_ref())?;
        let dictionary = Self::from_json_str(&data)?;
        info!(
            "Loaded {} categories ({} words) from {}",
            dictionary.categories.len(),
            dictionary.total_word_count(),
            path.as_ref().display()
        );
        Ok(dictionary)
    }

    /// Build a dictionary from already-constructed entries, validating them.
    ///
    /// # Errors
    ///
    /// The first entry problem, as for JSON input.
    pub fn from_entries<I, S>(categories: I) -> Result<Dictionary, DictionaryError>
    where
        I: IntoIterator<Item = (S, Vec<WordEntry>)>,
        S: Into<String>,
    {
        let raw: RawDictionary = categories.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let json = serde_json::to_string(&raw)?;
        Self::from_json_str(&json)
    }

    #[must_use]
    pub fn category(&self, name: &str) -> Option<&[WordEntry]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    /// Category names in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    #[must_use]
    pub fn total_word_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn category_stats(&self, name: &str) -> Option<CategoryStats> {
        let entries = self.categories.get(name)?;
        let lengths: Vec<usize> = entries.iter().map(WordEntry::len).collect();
        let total = lengths.len();
        Some(CategoryStats {
            total_words: total,
            min_length: lengths.iter().copied().min().unwrap_or(0),
            max_length: lengths.iter().copied().max().unwrap_or(0),
            avg_length: if total == 0 { 0.0 } else { lengths.iter().sum::<usize>() as f64 / total as f64 },
        })
    }

    #[must_use]
    pub fn categories_info(&self) -> Vec<CategoryInfo> {
        self.categories
            .iter()
            .map(|(name, entries)| CategoryInfo {
                name: name.clone(),
                word_count: entries.len(),
                available: entries.len() >= MIN_CATEGORY_SIZE,
            })
            .collect()
    }
}

fn read_dictionary_file(path: &Path) -> Result<String, DictionaryError> {
    std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Read a dictionary file and audit it; see [`Dictionary::audit_json_str`].
///
/// # Errors
///
/// I/O or JSON failure.
pub fn audit_path<P: AsRef<Path>>(path: P) -> Result<Vec<DictionaryError>, DictionaryError> {
    let data = read_dictionary_file(path.as_ref())?;
    Dictionary::audit_json_str(&data)
}
