//! Crossword construction engine.
//!
//! A [`Dictionary`] of categorized words goes in; a cropped, validated
//! [`Puzzle`] comes out. [`PuzzleBuilder`] drives the attempts, the
//! [`placer`] lays words on a [`grid`], and the [`validator`] accepts or
//! rejects the result.
//!
//! ```no_run
//! use crossforge::{Difficulty, Dictionary, GenerationOptions, PuzzleBuilder};
//!
//! let dictionary = Dictionary::load_from_path("data/dictionary.json")?;
//! let mut builder = PuzzleBuilder::seeded(&dictionary, GenerationOptions::default(), 42);
//! let puzzle = builder.generate("Космос", Difficulty::Medium)?;
//! println!("{}", puzzle.render('█')?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod alphabet;
pub mod builder;
pub mod dictionary;
pub mod difficulty;
pub mod errors;
pub mod grid;
pub mod identity;
pub mod log;
pub mod placer;
pub mod validator;

pub use builder::{GenerationError, GenerationOptions, Puzzle, PuzzleBuilder};
pub use dictionary::{Dictionary, WordEntry};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use errors::DictionaryError;
pub use grid::{Direction, Grid};
pub use identity::{puzzle_id, ExhaustionPolicy};
pub use validator::{Rejection, ValidationRules};
