//! Error types for dictionary loading with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (D001-D006) for documentation lookup:
//!
//! - D001: `Io` (Dictionary file could not be read)
//! - D002: `Json` (Dictionary file is not valid JSON of the expected shape)
//! - D003: `EmptyCategory` (Category holds no entries)
//! - D004: `InvalidChar` (Word contains a character outside the alphabet)
//! - D005: `WordLength` (Word length outside the global bounds)
//! - D006: `EmptyClue` (Entry has no clue text)
//!
//! # Examples
//!
//! ```
//! use crossforge::errors::DictionaryError;
//!
//! let err = DictionaryError::EmptyCategory { category: "Космос".to_string() };
//! assert_eq!(err.code(), "D003");
//! println!("{}", err.display_detailed());
//! ```

use std::io;

/// Custom error type for dictionary loading and entry validation
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary from '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed dictionary JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("category '{category}' has no entries")]
    EmptyCategory { category: String },

    #[error("word \"{word}\" in category '{category}' contains invalid character '{invalid_char}'")]
    InvalidChar {
        category: String,
        word: String,
        invalid_char: char,
    },

    #[error("word \"{word}\" in category '{category}' has {len} letters (allowed {min}-{max})")]
    WordLength {
        category: String,
        word: String,
        len: usize,
        min: usize,
        max: usize,
    },

    #[error("word \"{word}\" in category '{category}' has an empty clue")]
    EmptyClue { category: String, word: String },
}

impl DictionaryError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            DictionaryError::Io { .. } => "D001",
            DictionaryError::Json(_) => "D002",
            DictionaryError::EmptyCategory { .. } => "D003",
            DictionaryError::InvalidChar { .. } => "D004",
            DictionaryError::WordLength { .. } => "D005",
            DictionaryError::EmptyClue { .. } => "D006",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            DictionaryError::Io { .. } => "Dictionary file could not be read",
            DictionaryError::Json(_) => "Dictionary file is not valid JSON of the expected shape",
            DictionaryError::EmptyCategory { .. } => "Category holds no entries",
            DictionaryError::InvalidChar { .. } => "Word contains a character outside the alphabet",
            DictionaryError::WordLength { .. } => "Word length outside the global bounds",
            DictionaryError::EmptyClue { .. } => "Entry has no clue text",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            DictionaryError::Io { .. } => "The dictionary path does not exist or is not readable. The dictionary is loaded once at startup.",
            DictionaryError::Json(_) => "The dictionary must be a JSON object mapping each category name to an array of {\"word\", \"clue\", \"hint\"} objects.",
            DictionaryError::EmptyCategory { .. } => "A category was declared with an empty entry array. Such a category can never produce a puzzle.",
            DictionaryError::InvalidChar { .. } => "After normalization (uppercase, spaces and hyphens removed) every letter must belong to the Russian alphabet А-Я or Ё.",
            DictionaryError::WordLength { .. } => "Dictionary words must be between 3 and 12 letters long after normalization.",
            DictionaryError::EmptyClue { .. } => "Every entry needs clue text; the hint may be empty.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            DictionaryError::Io { .. } => Some("Check the --dictionary path (default: data/dictionary.json)"),
            DictionaryError::Json(_) => Some("Expected shape: {\"Космос\": [{\"word\": \"ОРБИТА\", \"clue\": \"...\", \"hint\": \"...\"}]}"),
            DictionaryError::EmptyCategory { .. } => Some("Remove the category or add entries to it"),
            DictionaryError::InvalidChar { .. } => Some("Only Cyrillic letters are allowed; latin look-alikes such as 'O' or 'C' are a common cause"),
            DictionaryError::WordLength { .. } => Some("Shorten or remove the entry; allowed lengths are 3-12 letters"),
            DictionaryError::EmptyClue { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_errors() -> Vec<DictionaryError> {
        vec![
            DictionaryError::Io {
                path: "missing.json".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            },
            DictionaryError::Json(serde_json::from_str::<serde_json::Value>("{").unwrap_err()),
            DictionaryError::EmptyCategory { category: "Спорт".to_string() },
            DictionaryError::InvalidChar {
                category: "Спорт".to_string(),
                word: "ГOЛ".to_string(),
                invalid_char: 'O',
            },
            DictionaryError::WordLength {
                category: "Спорт".to_string(),
                word: "ЯК".to_string(),
                len: 2,
                min: 3,
                max: 12,
            },
            DictionaryError::EmptyClue { category: "Спорт".to_string(), word: "МЯЧ".to_string() },
        ]
    }

    #[test]
    fn test_all_error_codes_are_unique() {
        let mut codes = std::collections::HashSet::new();
        for err in sample_errors() {
            let code = err.code();
            assert!(code.starts_with('D'), "Error code '{}' should start with 'D'", code);
            assert!(codes.insert(code), "Duplicate error code found: {}", code);
        }
        assert_eq!(codes.len(), 6);
    }

    #[test]
    fn test_error_code_format() {
        for err in sample_errors() {
            let code = err.code();
            assert_eq!(code.len(), 4, "Error code '{}' should be 4 characters (D0XX)", code);
            assert!(code[1..].parse::<u16>().is_ok(), "Error code '{}' should end with a number", code);
        }
    }

    #[test]
    fn test_display_detailed_includes_code_and_help() {
        let err = DictionaryError::EmptyCategory { category: "Космос".to_string() };
        let detailed = err.display_detailed();

        assert!(detailed.contains("D003"));
        assert!(detailed.contains(&err.to_string()));
        assert!(detailed.contains("Remove the category"));
    }

    #[test]
    fn test_display_detailed_without_help() {
        let err = DictionaryError::EmptyClue { category: "Спорт".to_string(), word: "МЯЧ".to_string() };
        assert_eq!(err.display_detailed(), format!("{} (D006)", err));
    }

    /// Test that error messages are useful
    #[test]
    fn test_error_messages_are_actionable() {
        let err = DictionaryError::WordLength {
            category: "Спорт".to_string(),
            word: "ЯК".to_string(),
            len: 2,
            min: 3,
            max: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("ЯК"));
        assert!(msg.contains('2') && msg.contains("3-12"));
    }

    #[test]
    fn test_help_text_differs_from_message() {
        for err in sample_errors() {
            if let Some(help) = err.help() {
                assert!(help.len() > 10, "Help text for {:?} should be substantial", err);
                assert_ne!(help, err.to_string());
            }
        }
    }
}
