//! Stable puzzle identifiers and the search for a puzzle not seen before.
//!
//! The identifier covers structure only: the grid and each word's text,
//! start cell and direction. Clues and hints are left out, so rewording a
//! clue keeps the identifier.

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::builder::{GenerationError, Puzzle, PuzzleBuilder};
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::grid::Direction;

/// Hex digits kept from the digest.
pub const ID_LEN: usize = 16;

#[derive(Serialize)]
struct IdentityView<'a> {
    grid: &'a [Vec<String>],
    words: Vec<WordKey<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WordKey<'a> {
    word: &'a str,
    start_row: usize,
    start_col: usize,
    direction: Direction,
}

/// First [`ID_LEN`] hex digits of SHA-256 over the canonical JSON of the puzzle's structure.
///
/// # Errors
///
/// Serialization failure.
pub fn puzzle_id(puzzle: &Puzzle) -> Result<String, serde_json::Error> {
    let view = IdentityView {
        grid: &puzzle.grid,
        words: puzzle
            .words
            .iter()
            .map(|w| WordKey {
                word: &w.word,
                start_row: w.start_row,
                start_col: w.start_col,
                direction: w.direction,
            })
            .collect(),
    };
    let json = serde_json::to_vec(&view)?;
    let mut hasher = Sha256::new();
    hasher.update(json);
    let mut id = format!("{:x}", hasher.finalize());
    id.truncate(ID_LEN);
    Ok(id)
}

/// What to do when every try produced an already-known puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExhaustionPolicy {
    /// Report [`GenerationError::NoUniquePuzzle`].
    #[default]
    Fail,
    /// Hand back the last duplicate, flagged as such.
    AcceptDuplicate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UniquePuzzle {
    pub id: String,
    pub puzzle: Puzzle,
    /// Set only under [`ExhaustionPolicy::AcceptDuplicate`].
    pub duplicate: bool,
    pub tries: usize,
}

impl<'d, R: Rng> PuzzleBuilder<'d, R> {
    /// Generate until the puzzle's id is not in `excluded_ids`, at most `max_tries` times.
    ///
    /// A try that runs out of attempts only uses up that try; input errors end
    /// the search at once.
    ///
    /// # Errors
    ///
    /// - Input errors from [`PuzzleBuilder::generate_with_profile`].
    /// - [`GenerationError::AttemptsExhausted`] (the last one) if no try produced a puzzle.
    /// - [`GenerationError::NoUniquePuzzle`] under [`ExhaustionPolicy::Fail`].
    pub fn generate_unique(
        &mut self,
        category: &str,
        difficulty: Difficulty,
        excluded_ids: &HashSet<String>,
        max_tries: usize,
        policy: ExhaustionPolicy,
    ) -> Result<UniquePuzzle, GenerationError> {
        let profile = difficulty.profile();
        self.generate_unique_with_profile(category, difficulty.as_str(), &profile, excluded_ids, max_tries, policy)
    }

    /// [`PuzzleBuilder::generate_unique`] with an explicit profile.
    ///
    /// # Errors
    ///
    /// As [`PuzzleBuilder::generate_unique`].
    pub fn generate_unique_with_profile(
        &mut self,
        category: &str,
        label: &str,
        profile: &DifficultyProfile,
        excluded_ids: &HashSet<String>,
        max_tries: usize,
        policy: ExhaustionPolicy,
    ) -> Result<UniquePuzzle, GenerationError> {
        let mut last = None;
        let mut exhausted = None;
        for tries in 1..=max_tries {
            let puzzle = match self.generate_with_profile(category, label, profile) {
                Ok(puzzle) => puzzle,
                Err(e @ GenerationError::AttemptsExhausted { .. }) => {
                    log::debug!("try {tries}/{max_tries}: {e}");
                    exhausted = Some(e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            let id = puzzle_id(&puzzle)?;
            if !excluded_ids.contains(&id) {
                return Ok(UniquePuzzle { id, puzzle, duplicate: false, tries });
            }
            log::debug!("try {tries}/{max_tries}: puzzle {id} already known");
            last = Some((id, puzzle));
        }

        match (policy, last, exhausted) {
            (ExhaustionPolicy::AcceptDuplicate, Some((id, puzzle)), _) => {
                log::warn!("Accepting duplicate puzzle {id} after {max_tries} tries");
                Ok(UniquePuzzle { id, puzzle, duplicate: true, tries: max_tries })
            }
            (_, None, Some(e)) => Err(e),
            _ => Err(GenerationError::NoUniquePuzzle { tries: max_tries }),
        }
    }
}
