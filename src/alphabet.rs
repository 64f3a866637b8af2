//! The supported alphabet and per-word helpers built on it.
//!
//! Puzzles are built from Russian words, so the alphabet is the 33 uppercase
//! Cyrillic letters (`А`..=`Я` plus `Ё`). Every entry is normalized to that
//! form once, when the dictionary is loaded; the grid only ever sees
//! normalized words.

use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

// Character-set constants
pub const ALPHABET_SIZE: usize = 33;
pub(crate) const UPPERCASE_ALPHABET: RangeInclusive<char> = 'А'..='Я';
pub(crate) const YO: char = 'Ё';

/// Letters ordered from most to least frequent in Russian text.
pub const LETTERS_BY_FREQUENCY: &str = "ОЕАИНТСРВЛКМДПУЯЫЬГЗБЧЙХЖШЮЦЩЭФЪЁ";

/// How many of the most frequent letters count as "common" when ranking words.
pub const COMMON_LETTER_COUNT: usize = 15;

/// Inclusive bounds on the length of any dictionary word, independent of difficulty.
pub const WORD_LENGTH_BOUNDS: RangeInclusive<usize> = 3..=12;

static COMMON_SET: LazyLock<HashSet<char>> =
    LazyLock::new(|| LETTERS_BY_FREQUENCY.chars().take(COMMON_LETTER_COUNT).collect());

pub trait PuzzleChar {
    /// Is this an uppercase letter of the supported alphabet?
    fn is_puzzle_letter(&self) -> bool;
    /// Is this one of the most frequent letters (good for crossings)?
    fn is_common_letter(&self) -> bool;
}

impl PuzzleChar for char {
    fn is_puzzle_letter(&self) -> bool {
        UPPERCASE_ALPHABET.contains(self) || *self == YO
    }
    fn is_common_letter(&self) -> bool {
        COMMON_SET.contains(self)
    }
}

/// Normalize a raw dictionary word: trim, uppercase, drop spaces and hyphens.
///
/// No alphabet check happens here; see [`first_foreign_char`].
#[must_use]
pub fn normalize_word(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// The first character of `word` outside the supported alphabet, if any.
#[must_use]
pub fn first_foreign_char(word: &str) -> Option<char> {
    word.chars().find(|c| !c.is_puzzle_letter())
}

/// Word length in letters (not bytes; Cyrillic is two bytes per letter in UTF-8).
#[inline]
#[must_use]
pub fn letter_count(word: &str) -> usize {
    word.chars().count()
}

/// Secondary ranking score: how many of the word's letters are common ones.
#[must_use]
pub fn common_letter_score(word: &str) -> usize {
    word.chars().filter(|c| c.is_common_letter()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_puzzle_letter() {
        assert!('А'.is_puzzle_letter());
        assert!('Я'.is_puzzle_letter());
        assert!('Ё'.is_puzzle_letter());
        assert!('Ж'.is_puzzle_letter());
    }

    #[test]
    fn test_is_not_puzzle_letter() {
        assert!(!'а'.is_puzzle_letter()); // lowercase
        assert!(!'A'.is_puzzle_letter()); // latin
        assert!(!'1'.is_puzzle_letter());
        assert!(!'-'.is_puzzle_letter());
    }

    #[test]
    fn test_alphabet_constants() {
        let n = UPPERCASE_ALPHABET.count() + 1;
        assert_eq!(n, ALPHABET_SIZE);
        assert_eq!(LETTERS_BY_FREQUENCY.chars().count(), ALPHABET_SIZE);
        let distinct: HashSet<char> = LETTERS_BY_FREQUENCY.chars().collect();
        assert_eq!(distinct.len(), ALPHABET_SIZE);
        assert!(LETTERS_BY_FREQUENCY.chars().all(|c| c.is_puzzle_letter()));
    }

    #[test]
    fn test_common_letters() {
        assert!('О'.is_common_letter());
        assert!('У'.is_common_letter());
        assert!(!'Я'.is_common_letter());
        assert!(!'Ф'.is_common_letter());
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("  атом "), "АТОМ");
        assert_eq!(normalize_word("Рок-н-ролл"), "РОКНРОЛЛ");
        assert_eq!(normalize_word("нью йорк"), "НЬЮЙОРК");
        assert_eq!(normalize_word("ёж"), "ЁЖ");
    }

    #[test]
    fn test_first_foreign_char() {
        assert_eq!(first_foreign_char("АТОМ"), None);
        assert_eq!(first_foreign_char("АТOМ"), Some('O')); // latin O
        assert_eq!(first_foreign_char("R2Д2"), Some('R'));
    }

    #[test]
    fn test_common_letter_score() {
        assert_eq!(letter_count("ЭНЕРГИЯ"), 7);
        // Э Г Я are not common
        assert_eq!(common_letter_score("ЭНЕРГИЯ"), 4);
        assert!(common_letter_score("СВЕТ") > common_letter_score("ФЫЖЬ"));
    }
}
