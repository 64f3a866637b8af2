//! Generate error code documentation from the source of truth (error enums).
//!
//! This binary reads the codes, descriptions, details, and help text directly
//! from `DictionaryError`, `GenerationError` and `Rejection` via their
//! `code()`, `description()`, `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::io;

use crossforge::builder::GenerationError;
use crossforge::errors::DictionaryError;
use crossforge::grid::Direction;
use crossforge::validator::Rejection;

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            println!("### {}: {}\n", error.code(), error.description());
            println!("**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                println!("**How to fix:**");
                println!("```");
                println!("{help_text}");
                println!("```\n");
            }

            println!("**Example error message:**");
            println!("```");
            println!("{error}");
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

/// Helper to create all `DictionaryError` variants for documentation
fn all_dictionary_error_variants() -> Vec<DictionaryError> {
    vec![
        DictionaryError::Io {
            path: "data/dictionary.json".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        },
        // Json--create by parsing a truncated document
        DictionaryError::Json(serde_json::from_str::<serde_json::Value>("{\"Космос\": [").unwrap_err()),
        DictionaryError::EmptyCategory { category: "Космос".to_string() },
        DictionaryError::InvalidChar {
            category: "Космос".to_string(),
            word: "OРБИТА".to_string(),
            invalid_char: 'O',
        },
        DictionaryError::WordLength {
            category: "Космос".to_string(),
            word: "ЯК".to_string(),
            len: 2,
            min: 3,
            max: 12,
        },
        DictionaryError::EmptyClue { category: "Космос".to_string(), word: "ОРБИТА".to_string() },
    ]
}

/// Helper to create all `GenerationError` variants for documentation
fn all_generation_error_variants() -> Vec<GenerationError> {
    vec![
        GenerationError::UnknownCategory { category: "Химия".to_string() },
        GenerationError::InsufficientWords { category: "Космос".to_string(), eligible: 5, required: 8 },
        GenerationError::AttemptsExhausted {
            attempts: 10,
            last_rejection: Some(Rejection::TooFewWords { placed: 6, required: 8 }),
            best_effort: None,
        },
        GenerationError::Dictionary(DictionaryError::EmptyCategory { category: "Космос".to_string() }),
        GenerationError::Serialization(serde_json::from_str::<serde_json::Value>("[").unwrap_err()),
        GenerationError::NoUniquePuzzle { tries: 10 },
        GenerationError::InvalidProfile { label: "custom".to_string(), range: "word count" },
    ]
}

/// Helper to create all `Rejection` variants for documentation
fn all_rejection_variants() -> Vec<Rejection> {
    vec![
        Rejection::TooFewWords { placed: 6, required: 8 },
        Rejection::Disconnected { reached: 5, total: 8 },
        Rejection::DensityOutOfBand { density: 0.24, min: 0.30, max: 0.70 },
        Rejection::GridTooSmall { rows: 5, cols: 9, min: 6 },
        Rejection::StrayRun { text: "АС".to_string(), row: 0, col: 0, direction: Direction::Vertical },
        Rejection::LetterConflict { word: "МИР".to_string(), row: 2, col: 4, expected: 'И', found: Some('О') },
        Rejection::DuplicateWord { word: "АТОМ".to_string() },
        Rejection::WordTooShort { word: "ЁЖ".to_string(), min: 3 },
        Rejection::OutOfBounds { word: "ЛАЗЕР".to_string() },
        Rejection::UncoveredCell { row: 4, col: 0, letter: 'Ж' },
    ]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    println!("## Table of Contents\n");
    println!("- [Generation Errors (G001–G007)](#generation-errors)");
    println!("- [Dictionary Errors (D001–D006)](#dictionary-errors)");
    println!("- [Validator Rejections (V001–V010)](#validator-rejections)");
    println!("- [How to Use Error Codes](#how-to-use-error-codes)\n");

    println!("## Generation Errors\n");
    println!("Top-level errors from the puzzle builder. `G004` wraps a dictionary error.\n");
    generate_error_docs!(all_generation_error_variants());

    println!("## Dictionary Errors\n");
    println!("Errors found while loading or auditing the dictionary.\n");
    generate_error_docs!(all_dictionary_error_variants());

    println!("## Validator Rejections\n");
    println!("Reasons a finished grid is rejected. A rejected attempt is retried; the last rejection is reported with `G003`.\n");
    generate_error_docs!(all_rejection_variants());

    println!("\n## How to Use Error Codes\n");
    println!("When you see an error like:\n");
    println!("```");
    println!("Error: category 'Химия' not found in the dictionary (G001)");
    println!("Run with --list-categories to see the available categories");
    println!("```\n");
    println!("1. Note the error code (e.g., `G001`)");
    println!("2. Look it up in this document for detailed explanation");
    println!("3. Follow the suggested resolution steps\n");

    println!("## Error Display Formats\n");
    println!("### Simple Format");
    println!("```");
    println!("Error: <message>");
    println!("```\n");
    println!("### Detailed Format (via `display_detailed()`)");
    println!("```");
    println!("<message> (<code>)");
    println!("<help text if available>");
    println!("```\n");
}
