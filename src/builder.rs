//! `builder`: the generation state machine
//!
//! One request runs through
//!
//! ```text
//! SELECT_CANDIDATES -> PLACE -> VALIDATE -> (ACCEPT | RETRY) -> CROP -> EMIT
//! ```
//!
//! Input problems (unknown category, too few eligible words) are reported
//! before any placement starts. A rejected attempt is thrown away whole and
//! the next one starts from a fresh sample and a fresh grid; there is no
//! backtracking. Running out of attempts is a distinct error that carries the
//! best invalid attempt, so the caller can decide whether to use it.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::alphabet::{letter_count, normalize_word};
use crate::dictionary::{Dictionary, WordEntry};
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::errors::DictionaryError;
use crate::grid::{Direction, Grid};
use crate::placer::WordPlacer;
use crate::validator::{check_runs, validate, Rejection, ValidationRules};

/// Working grid side used unless the longest candidate needs more room.
pub const DEFAULT_GRID_SIZE: usize = 13;
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;
/// Extra candidates sampled beyond the profile's word-count ceiling.
pub const DEFAULT_CANDIDATE_SLACK: usize = 10;

/// Tunables for [`PuzzleBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub grid_size: usize,
    pub max_attempts: usize,
    pub candidate_slack: usize,
    pub rules: ValidationRules,
    /// Normalized words that must not appear in the puzzle.
    pub excluded_words: HashSet<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            candidate_slack: DEFAULT_CANDIDATE_SLACK,
            rules: ValidationRules::default(),
            excluded_words: HashSet::new(),
        }
    }
}

impl GenerationOptions {
    /// Exclude `words` (normalized first) from candidate selection.
    #[must_use]
    pub fn with_excluded_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded_words
            .extend(words.into_iter().map(|w| normalize_word(w.as_ref())));
        self
    }
}

/// One word of a finished puzzle, in cropped coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub word: String,
    pub clue: String,
    pub hint: String,
    pub start_row: usize,
    pub start_col: usize,
    pub direction: Direction,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleMetadata {
    pub word_count: usize,
    pub grid_rows: usize,
    pub grid_cols: usize,
    /// Rounded to two decimals.
    pub fill_density: f64,
    /// Attempt (1-based) that produced this grid.
    pub attempts: usize,
}

/// A finished puzzle, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    /// Rows of one-letter strings, `""` for an empty cell.
    pub grid: Vec<Vec<String>>,
    /// Words in placement order.
    pub words: Vec<WordRecord>,
    pub category: String,
    pub difficulty: String,
    pub metadata: PuzzleMetadata,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

impl Puzzle {
    /// Snapshot a (cropped) grid.
    #[must_use]
    pub fn from_grid(grid: &Grid, category: &str, difficulty: &str, attempts: usize) -> Self {
        let words: Vec<WordRecord> = grid
            .placed_words()
            .iter()
            .map(|p| WordRecord {
                word: p.word.clone(),
                clue: p.clue.clone(),
                hint: p.hint.clone(),
                start_row: p.row,
                start_col: p.col,
                direction: p.direction,
                length: p.len(),
            })
            .collect();
        Puzzle {
            grid: grid.to_rows(),
            metadata: PuzzleMetadata {
                word_count: words.len(),
                grid_rows: grid.rows(),
                grid_cols: grid.cols(),
                fill_density: round2(grid.fill_density()),
                attempts,
            },
            words,
            category: category.to_string(),
            difficulty: difficulty.to_string(),
        }
    }

    /// Rebuild the [`Grid`] by replaying the words in placement order.
    ///
    /// A puzzle read back from JSON is not trusted: every word must fit the
    /// recorded dimensions and agree with the letters already replayed, and
    /// the result must hold no run of letters that is not one of the words.
    ///
    /// # Errors
    ///
    /// [`Rejection::OutOfBounds`], [`Rejection::LetterConflict`] or
    /// [`Rejection::StrayRun`] for the first problem found.
    pub fn to_grid(&self) -> Result<Grid, Rejection> {
        let mut grid = Grid::with_dimensions(self.metadata.grid_rows, self.metadata.grid_cols);
        for w in &self.words {
            let len = letter_count(&w.word);
            let (along, across, limit, side) = match w.direction {
                Direction::Horizontal => (w.start_col, w.start_row, grid.cols(), grid.rows()),
                Direction::Vertical => (w.start_row, w.start_col, grid.rows(), grid.cols()),
            };
            if across >= side || along.checked_add(len).map_or(true, |end| end > limit) {
                return Err(Rejection::OutOfBounds { word: w.word.clone() });
            }
            for (i, expected) in w.word.chars().enumerate() {
                let (row, col) = w.direction.advance(w.start_row, w.start_col, i);
                if let Some(found) = grid.get(row, col).filter(|&found| found != expected) {
                    return Err(Rejection::LetterConflict {
                        word: w.word.clone(),
                        row,
                        col,
                        expected,
                        found: Some(found),
                    });
                }
            }
            grid.write_word(&w.word, &w.clue, &w.hint, w.start_row, w.start_col, w.direction);
        }
        match check_runs(&grid).into_iter().next() {
            Some(stray) => Err(stray),
            None => Ok(grid),
        }
    }

    /// The grid as text, `empty` standing in for empty cells.
    ///
    /// # Errors
    ///
    /// As [`Puzzle::to_grid`].
    pub fn render(&self, empty: char) -> Result<String, Rejection> {
        Ok(self.to_grid()?.render(empty))
    }

    /// Write this puzzle as pretty JSON to `path`.
    ///
    /// # Errors
    ///
    /// Any I/O or serialization failure.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Failures of a generation request.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("category '{category}' not found in the dictionary")]
    UnknownCategory { category: String },

    #[error("not enough words in category '{category}': {eligible} eligible < {required} required")]
    InsufficientWords { category: String, eligible: usize, required: usize },

    /// Carries the attempt that placed the most words, cropped, for callers that degrade.
    #[error("could not build a valid puzzle in {attempts} attempts")]
    AttemptsExhausted {
        attempts: usize,
        last_rejection: Option<Rejection>,
        best_effort: Option<Box<Puzzle>>,
    },

    #[error("dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("could not serialize puzzle: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("every one of {tries} tries produced an already known puzzle")]
    NoUniquePuzzle { tries: usize },

    #[error("difficulty '{label}' has an empty {range} range")]
    InvalidProfile { label: String, range: &'static str },
}

impl GenerationError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::UnknownCategory { .. } => "G001",
            GenerationError::InsufficientWords { .. } => "G002",
            GenerationError::AttemptsExhausted { .. } => "G003",
            GenerationError::Dictionary(_) => "G004",
            GenerationError::Serialization(_) => "G005",
            GenerationError::NoUniquePuzzle { .. } => "G006",
            GenerationError::InvalidProfile { .. } => "G007",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            GenerationError::UnknownCategory { .. } => "Unknown category",
            GenerationError::InsufficientWords { .. } => "Too few eligible words for the difficulty",
            GenerationError::AttemptsExhausted { .. } => "No valid puzzle within the attempt bound",
            GenerationError::Dictionary(_) => "Dictionary could not be loaded",
            GenerationError::Serialization(_) => "Puzzle could not be serialized",
            GenerationError::NoUniquePuzzle { .. } => "Only already known puzzles were produced",
            GenerationError::InvalidProfile { .. } => "Difficulty profile admits nothing",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            GenerationError::UnknownCategory { .. } => "The requested category is not a key of the loaded dictionary. Category names are matched exactly.",
            GenerationError::InsufficientWords { .. } => "After removing excluded words and words outside the difficulty's length range, fewer words remain than the smallest puzzle needs. This is checked before any placement.",
            GenerationError::AttemptsExhausted { .. } => "Every attempt was rejected by the validator. The error carries the last rejection and the best invalid attempt so the caller can choose to use it.",
            GenerationError::Dictionary(_) => "This wraps an underlying DictionaryError (see Dictionary Errors section for specific error codes).",
            GenerationError::Serialization(_) => "Turning a puzzle into JSON failed, either for its identifier or for output.",
            GenerationError::NoUniquePuzzle { .. } => "The unique-puzzle search produced only puzzles whose identifiers were in the excluded set, and the caller chose to fail rather than accept a duplicate.",
            GenerationError::InvalidProfile { .. } => "A custom profile's word-count or word-length range is empty (its start is past its end). It is refused before any candidate is sampled.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GenerationError::UnknownCategory { .. } => Some("Run with --list-categories to see the available categories"),
            GenerationError::InsufficientWords { .. } => Some("Add words to the category, pick an easier difficulty, or exclude fewer words"),
            GenerationError::AttemptsExhausted { .. } => Some("Retry, raise the attempt bound, or pass --accept-best to use the best invalid attempt"),
            GenerationError::NoUniquePuzzle { .. } => Some("Allow more tries, exclude fewer ids, or accept duplicates"),
            GenerationError::InvalidProfile { .. } => Some("Give each range a start no greater than its end, e.g. 8..=10"),
            GenerationError::Dictionary(_) | GenerationError::Serialization(_) => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            GenerationError::Dictionary(de) => {
                format!("{}\n  caused by: {}", self.code(), de.display_detailed())
            }
            GenerationError::AttemptsExhausted { last_rejection: Some(r), .. } => {
                let base = format!("{self}; last rejection: {r} ({})", r.code());
                crate::errors::format_error_with_code_and_help(&base, self.code(), self.help())
            }
            _ => crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help()),
        }
    }
}

/// Running totals over every request a builder has served.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationStats {
    pub total_generated: usize,
    pub successful: usize,
    pub failed: usize,
    pub total_time: Duration,
}

impl GenerationStats {
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total_generated == 0 {
            0.0
        } else {
            self.successful as f64 / self.total_generated as f64
        }
    }

    #[must_use]
    pub fn avg_generation_time(&self) -> Duration {
        match u32::try_from(self.total_generated) {
            Ok(n) if n > 0 => self.total_time / n,
            _ => Duration::ZERO,
        }
    }

    fn record(&mut self, success: bool, elapsed: Duration) {
        self.total_generated += 1;
        if success {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        self.total_time += elapsed;
    }
}

/// Result of [`PuzzleBuilder::generate_batch`].
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub puzzles: Vec<Puzzle>,
    /// Requests that ran out of attempts.
    pub failed: usize,
}

/// Builds puzzles from a shared, read-only [`Dictionary`].
///
/// All randomness comes from the injected `rng`; seed it for reproducible output.
pub struct PuzzleBuilder<'d, R = StdRng> {
    dictionary: &'d Dictionary,
    options: GenerationOptions,
    rng: R,
    stats: GenerationStats,
}

impl<'d> PuzzleBuilder<'d, StdRng> {
    /// A builder drawing from OS entropy.
    #[must_use]
    pub fn new(dictionary: &'d Dictionary, options: GenerationOptions) -> Self {
        Self::with_rng(dictionary, options, StdRng::from_entropy())
    }

    /// A reproducible builder.
    #[must_use]
    pub fn seeded(dictionary: &'d Dictionary, options: GenerationOptions, seed: u64) -> Self {
        Self::with_rng(dictionary, options, StdRng::seed_from_u64(seed))
    }
}

impl<'d, R: Rng> PuzzleBuilder<'d, R> {
    #[must_use]
    pub fn with_rng(dictionary: &'d Dictionary, options: GenerationOptions, rng: R) -> Self {
        Self {
            dictionary,
            options,
            rng,
            stats: GenerationStats::default(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    #[must_use]
    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    /// Build one puzzle for `category` at a named difficulty tier.
    ///
    /// # Errors
    ///
    /// See [`PuzzleBuilder::generate_with_profile`].
    pub fn generate(&mut self, category: &str, difficulty: Difficulty) -> Result<Puzzle, GenerationError> {
        self.generate_with_profile(category, difficulty.as_str(), &difficulty.profile())
    }

    /// Build one puzzle for `category` with an explicit profile; `label` is
    /// recorded as the puzzle's difficulty.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::InvalidProfile`], [`GenerationError::UnknownCategory`] or
    ///   [`GenerationError::InsufficientWords`] before any placement starts.
    /// - [`GenerationError::AttemptsExhausted`] when every attempt was rejected.
    pub fn generate_with_profile(
        &mut self,
        category: &str,
        label: &str,
        profile: &DifficultyProfile,
    ) -> Result<Puzzle, GenerationError> {
        if let Some(range) = profile.empty_range() {
            return Err(GenerationError::InvalidProfile { label: label.to_string(), range });
        }
        let eligible = self.eligible_words(category, profile)?;
        let started = Instant::now();
        let result = self.run_attempts(category, label, profile, &eligible);
        self.stats.record(result.is_ok(), started.elapsed());
        result
    }

    /// SELECT_CANDIDATES input check: the words a sample may draw from.
    fn eligible_words(&self, category: &str, profile: &DifficultyProfile) -> Result<Vec<&'d WordEntry>, GenerationError> {
        let entries = self
            .dictionary
            .category(category)
            .ok_or_else(|| GenerationError::UnknownCategory { category: category.to_string() })?;
        let rules = &self.options.rules;
        let eligible: Vec<&WordEntry> = entries
            .iter()
            .filter(|e| profile.admits_length(e.len()) && e.len() >= rules.min_word_length)
            .filter(|e| !self.options.excluded_words.contains(&e.word))
            .collect();

        let required = (*profile.word_count.start()).max(rules.min_words);
        if eligible.len() < required {
            return Err(GenerationError::InsufficientWords {
                category: category.to_string(),
                eligible: eligible.len(),
                required,
            });
        }
        Ok(eligible)
    }

    fn run_attempts(
        &mut self,
        category: &str,
        label: &str,
        profile: &DifficultyProfile,
        eligible: &[&WordEntry],
    ) -> Result<Puzzle, GenerationError> {
        let max_attempts = self.options.max_attempts;
        let mut best: Option<(Grid, usize)> = None;
        let mut last_rejection = None;

        for attempt in 1..=max_attempts {
            let target = self.rng.gen_range(profile.word_count.clone());
            let sample_size = (profile.word_count.end() + self.options.candidate_slack).min(eligible.len());
            let sample: Vec<WordEntry> = eligible
                .choose_multiple(&mut self.rng, sample_size)
                .map(|e| (*e).clone())
                .collect();

            let longest = sample.iter().map(WordEntry::len).max().unwrap_or(0);
            let mut grid = Grid::new(self.options.grid_size.max(longest));
            let report = WordPlacer::new(&mut self.rng).place_all(&mut grid, &sample, target);

            match validate(&grid, &self.options.rules) {
                Ok(()) => {
                    grid.crop_empty_edges();
                    let puzzle = Puzzle::from_grid(&grid, category, label, attempt);
                    info!(
                        "Built {category}/{label} puzzle: {} words, {}x{}, density {:.2} (attempt {attempt})",
                        puzzle.metadata.word_count,
                        puzzle.metadata.grid_rows,
                        puzzle.metadata.grid_cols,
                        puzzle.metadata.fill_density
                    );
                    return Ok(puzzle);
                }
                Err(rejection) => {
                    debug!(
                        "attempt {attempt}/{max_attempts} rejected ({}): {rejection}; placed {}/{target}",
                        rejection.code(),
                        report.placed.len()
                    );
                    let placed = report.placed.len();
                    if best.as_ref().map_or(true, |(_, n)| placed > *n) {
                        best = Some((grid, placed));
                    }
                    last_rejection = Some(rejection);
                }
            }
        }

        warn!("No valid {category}/{label} puzzle after {max_attempts} attempts");
        let best_effort = best.map(|(mut grid, _)| {
            grid.crop_empty_edges();
            Box::new(Puzzle::from_grid(&grid, category, label, max_attempts))
        });
        Err(GenerationError::AttemptsExhausted {
            attempts: max_attempts,
            last_rejection,
            best_effort,
        })
    }

    /// Build `count` puzzles, skipping requests that run out of attempts.
    ///
    /// # Errors
    ///
    /// Input errors abort the batch; exhausted attempts are only counted.
    pub fn generate_batch(
        &mut self,
        category: &str,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<BatchOutcome, GenerationError> {
        let mut outcome = BatchOutcome::default();
        for i in 1..=count {
            match self.generate(category, difficulty) {
                Ok(puzzle) => outcome.puzzles.push(puzzle),
                Err(GenerationError::AttemptsExhausted { .. }) => {
                    warn!("[{i}/{count}] {category}: generation failed");
                    outcome.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(outcome)
    }
}

/// ASCII file-name stem for a category.
#[must_use]
pub fn category_slug(category: &str) -> String {
    match category {
        "Наука и технологии" => "science".to_string(),
        "История" => "history".to_string(),
        "Искусство" => "art".to_string(),
        "Спорт" => "sport".to_string(),
        "Литература" => "literature".to_string(),
        "Кино и сериалы" => "cinema".to_string(),
        "Музыка" => "music".to_string(),
        "География" => "geography".to_string(),
        "Природа" => "nature".to_string(),
        "Кулинария" => "cooking".to_string(),
        "Космос" => "space".to_string(),
        other => other.to_lowercase().replace(' ', "_"),
    }
}

/// `<slug>_<difficulty>_<NNN>.json`, `index` starting at 1.
#[must_use]
pub fn batch_filename(category: &str, difficulty: &str, index: usize) -> String {
    format!("{}_{difficulty}_{index:03}.json", category_slug(category))
}

/// Save `puzzles` into `dir` (created if missing) under [`batch_filename`] names.
///
/// # Errors
///
/// Any I/O or serialization failure; files already written stay on disk.
pub fn write_batch<P: AsRef<Path>>(dir: P, puzzles: &[Puzzle]) -> io::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    puzzles
        .iter()
        .enumerate()
        .map(|(i, puzzle)| {
            let path = dir.join(batch_filename(&puzzle.category, &puzzle.difficulty, i + 1));
            puzzle.save_to(&path)?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::check_connected;

    const SCENARIO: [&str; 8] = ["АТОМ", "ЛАЗЕР", "МИР", "РОБОТ", "СВЕТ", "ВОЛНА", "ЭНЕРГИЯ", "ФИЗИКА"];

    fn dictionary(words: &[&str]) -> Dictionary {
        let entries = words
            .iter()
            .map(|w| WordEntry::new(w, &format!("Подсказка к {w}"), ""))
            .collect();
        Dictionary::from_entries([("Физика", entries)]).unwrap()
    }

    fn scenario_options() -> GenerationOptions {
        GenerationOptions { max_attempts: 200, ..Default::default() }
    }

    #[test]
    fn test_unknown_category() {
        let dict = dictionary(&SCENARIO);
        let mut builder = PuzzleBuilder::seeded(&dict, GenerationOptions::default(), 1);
        let err = builder.generate("Химия", Difficulty::Easy).unwrap_err();
        assert_eq!(err.code(), "G001");
        assert_eq!(builder.stats().total_generated, 0);
    }

    #[test]
    fn test_five_eligible_words_is_an_input_error() {
        let dict = dictionary(&["АТОМ", "ЛАЗЕР", "РОБОТ", "ВОЛНА", "ФИЗИКА"]);
        let mut builder = PuzzleBuilder::seeded(&dict, GenerationOptions::default(), 1);
        let err = builder.generate("Физика", Difficulty::Easy).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::InsufficientWords { eligible: 5, required: 8, .. }
        ));
    }

    #[test]
    fn test_length_bounds_shrink_eligible_pool() {
        // easy admits 4..=8 letters, so МИР drops out and 7 remain
        let dict = dictionary(&SCENARIO);
        let mut builder = PuzzleBuilder::seeded(&dict, GenerationOptions::default(), 1);
        let err = builder.generate("Физика", Difficulty::Easy).unwrap_err();
        assert!(matches!(err, GenerationError::InsufficientWords { eligible: 7, .. }));
    }

    #[test]
    fn test_excluded_words_are_not_eligible() {
        let dict = dictionary(&SCENARIO);
        let options = GenerationOptions::default().with_excluded_words(["атом"]);
        let mut builder = PuzzleBuilder::seeded(&dict, options, 1);
        let profile = DifficultyProfile::new(8..=8, 3..=7);
        let err = builder.generate_with_profile("Физика", "custom", &profile).unwrap_err();
        assert!(matches!(err, GenerationError::InsufficientWords { eligible: 7, .. }));
    }

    #[test]
    fn test_scenario_places_all_eight_words() {
        let dict = dictionary(&SCENARIO);
        let mut builder = PuzzleBuilder::seeded(&dict, scenario_options(), 2024);
        let profile = DifficultyProfile::new(8..=8, 3..=7);
        let puzzle = builder.generate_with_profile("Физика", "custom", &profile).unwrap();

        let mut words: Vec<&str> = puzzle.words.iter().map(|w| w.word.as_str()).collect();
        words.sort_unstable();
        let mut expected = SCENARIO.to_vec();
        expected.sort_unstable();
        assert_eq!(words, expected);

        let grid = puzzle.to_grid().unwrap();
        assert!(validate(&grid, &ValidationRules::default()).is_ok());
        assert!(check_connected(grid.placed_words()).is_ok());
        assert_eq!(puzzle.metadata.word_count, 8);
        let density = grid.fill_density();
        assert!(density > 0.3 && density < 0.7);
        assert_eq!(builder.stats().successful, 1);
    }

    #[test]
    fn test_emitted_grid_is_cropped() {
        let dict = dictionary(&SCENARIO);
        let mut builder = PuzzleBuilder::seeded(&dict, scenario_options(), 9);
        let profile = DifficultyProfile::new(8..=8, 3..=7);
        let puzzle = builder.generate_with_profile("Физика", "custom", &profile).unwrap();

        assert_eq!(puzzle.grid.len(), puzzle.metadata.grid_rows);
        assert!(puzzle.grid.iter().all(|row| row.len() == puzzle.metadata.grid_cols));
        assert!(puzzle.grid[0].iter().any(|c| !c.is_empty()));
        assert!(puzzle.grid.last().unwrap().iter().any(|c| !c.is_empty()));
        assert!(puzzle.grid.iter().any(|row| !row[0].is_empty()));
        assert!(puzzle.grid.iter().any(|row| !row.last().unwrap().is_empty()));
        let mut grid = puzzle.to_grid().unwrap();
        assert_eq!(grid.crop_empty_edges(), (puzzle.metadata.grid_rows, puzzle.metadata.grid_cols));
    }

    #[test]
    fn test_exhaustion_carries_best_effort() {
        let dict = dictionary(&SCENARIO);
        // no grid built from these words can be 50 cells wide
        let rules = ValidationRules { min_grid_side: 50, ..Default::default() };
        let options = GenerationOptions { max_attempts: 3, rules, ..Default::default() };
        let mut builder = PuzzleBuilder::seeded(&dict, options, 5);
        let profile = DifficultyProfile::new(8..=8, 3..=7);
        let err = builder.generate_with_profile("Физика", "custom", &profile).unwrap_err();
        assert_eq!(err.code(), "G003");
        match err {
            GenerationError::AttemptsExhausted { attempts, last_rejection, best_effort } => {
                assert_eq!(attempts, 3);
                assert!(last_rejection.is_some());
                let best = best_effort.unwrap();
                assert!(best.metadata.word_count >= 1);
                assert_eq!(best.metadata.attempts, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        let stats = builder.stats();
        assert_eq!((stats.total_generated, stats.failed), (1, 1));
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_short_attempt_is_rejected_and_retried() {
        let dict = dictionary(&SCENARIO);
        let profile = DifficultyProfile::new(8..=8, 3..=7);
        let single = GenerationOptions { max_attempts: 1, ..Default::default() };
        // a seed whose first attempt places fewer than eight words
        let seed = (0..200u64)
            .find(|&seed| {
                let mut builder = PuzzleBuilder::seeded(&dict, single.clone(), seed);
                matches!(
                    builder.generate_with_profile("Физика", "custom", &profile),
                    Err(GenerationError::AttemptsExhausted {
                        last_rejection: Some(Rejection::TooFewWords { required: 8, .. }),
                        ..
                    })
                )
            })
            .expect("some seed falls short on its first attempt");

        // same seed, same first attempt; this time the builder may retry
        let mut builder = PuzzleBuilder::seeded(&dict, scenario_options(), seed);
        let puzzle = builder.generate_with_profile("Физика", "custom", &profile).unwrap();
        assert!(puzzle.metadata.attempts > 1);
        assert_eq!(puzzle.metadata.word_count, 8);
        assert_eq!(validate(&puzzle.to_grid().unwrap(), &ValidationRules::default()), Ok(()));
    }

    #[test]
    fn test_empty_profile_range_is_an_input_error() {
        let dict = dictionary(&["АТОМ", "ЛАЗЕР", "МИР", "РОБОТ", "СВЕТ", "ВОЛНА", "ЭНЕРГИЯ", "ФИЗИКА", "ОПТИКА", "ТОК"]);
        let mut builder = PuzzleBuilder::seeded(&dict, GenerationOptions::default(), 1);
        #[allow(clippy::reversed_empty_ranges)]
        let backwards = DifficultyProfile { word_count: 10..=8, word_length: 3..=7 };
        let err = builder.generate_with_profile("Физика", "custom", &backwards).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidProfile { range: "word count", .. }));
        assert_eq!(err.code(), "G007");
        assert_eq!(builder.stats().total_generated, 0);
    }

    fn replayed(words: &[(&str, usize, usize, Direction)], rows: usize, cols: usize) -> Result<Grid, Rejection> {
        let puzzle = Puzzle {
            grid: vec![vec![String::new(); cols]; rows],
            words: words
                .iter()
                .map(|&(word, start_row, start_col, direction)| WordRecord {
                    word: word.to_string(),
                    clue: String::new(),
                    hint: String::new(),
                    start_row,
                    start_col,
                    direction,
                    length: word.chars().count(),
                })
                .collect(),
            category: "Физика".to_string(),
            difficulty: "easy".to_string(),
            metadata: PuzzleMetadata { word_count: words.len(), grid_rows: rows, grid_cols: cols, fill_density: 0.0, attempts: 1 },
        };
        puzzle.to_grid()
    }

    #[test]
    fn test_loaded_puzzle_with_word_past_the_edge() {
        let json = r#"{
            "grid": [["М", "И", "Р"]],
            "words": [{"word": "МИР", "clue": "", "hint": "", "startRow": 0, "startCol": 2, "direction": "horizontal", "length": 3}],
            "category": "Физика",
            "difficulty": "easy",
            "metadata": {"wordCount": 1, "gridRows": 1, "gridCols": 3, "fillDensity": 1.0, "attempts": 1}
        }"#;
        let puzzle: Puzzle = serde_json::from_str(json).unwrap();
        assert_eq!(puzzle.to_grid(), Err(Rejection::OutOfBounds { word: "МИР".to_string() }));
        assert!(puzzle.render('.').is_err());

        let below = replayed(&[("МИР", 1, 0, Direction::Horizontal)], 1, 3);
        assert_eq!(below, Err(Rejection::OutOfBounds { word: "МИР".to_string() }));
        let huge = replayed(&[("МИР", 0, usize::MAX, Direction::Horizontal)], 1, 3);
        assert_eq!(huge, Err(Rejection::OutOfBounds { word: "МИР".to_string() }));
    }

    #[test]
    fn test_loaded_puzzle_with_inconsistent_words() {
        let conflict = replayed(&[("МИР", 0, 0, Direction::Horizontal), ("ДОМ", 0, 0, Direction::Vertical)], 3, 3);
        assert_eq!(
            conflict,
            Err(Rejection::LetterConflict { word: "ДОМ".to_string(), row: 0, col: 0, expected: 'Д', found: Some('М') })
        );

        let side_by_side = replayed(&[("МИР", 0, 0, Direction::Horizontal), ("ДОМ", 1, 0, Direction::Horizontal)], 3, 3);
        assert!(matches!(side_by_side, Err(Rejection::StrayRun { .. })));

        let crossing = replayed(&[("МИР", 0, 0, Direction::Horizontal), ("РОТ", 0, 2, Direction::Vertical)], 3, 3).unwrap();
        assert_eq!(crossing.placed_words().len(), 2);
        assert_eq!(crossing.get(2, 2), Some('Т'));
    }

    #[test]
    fn test_same_seed_same_puzzle() {
        let dict = dictionary(&SCENARIO);
        let profile = DifficultyProfile::new(8..=8, 3..=7);
        let run = |seed| {
            let mut builder = PuzzleBuilder::seeded(&dict, scenario_options(), seed);
            builder.generate_with_profile("Физика", "custom", &profile).unwrap()
        };
        assert_eq!(run(77), run(77));
    }

    #[test]
    fn test_puzzle_json_shape() {
        let dict = dictionary(&SCENARIO);
        let mut builder = PuzzleBuilder::seeded(&dict, scenario_options(), 3);
        let profile = DifficultyProfile::new(8..=8, 3..=7);
        let puzzle = builder.generate_with_profile("Физика", "custom", &profile).unwrap();
        let json = serde_json::to_value(&puzzle).unwrap();

        let word = &json["words"][0];
        for key in ["word", "clue", "hint", "startRow", "startCol", "direction", "length"] {
            assert!(word.get(key).is_some(), "missing {key}");
        }
        assert!(matches!(word["direction"].as_str(), Some("horizontal" | "vertical")));
        for key in ["wordCount", "gridRows", "gridCols", "fillDensity", "attempts"] {
            assert!(json["metadata"].get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["category"], "Физика");
        assert_eq!(json["difficulty"], "custom");

        let back: Puzzle = serde_json::from_value(json).unwrap();
        assert_eq!(back, puzzle);
    }

    #[test]
    fn test_category_slugs() {
        assert_eq!(category_slug("Наука и технологии"), "science");
        assert_eq!(category_slug("Космос"), "space");
        assert_eq!(category_slug("Мои Слова"), "мои_слова");
        assert_eq!(batch_filename("Спорт", "hard", 7), "sport_hard_007.json");
    }

    #[test]
    fn test_error_display_detailed() {
        let err = GenerationError::InsufficientWords { category: "X".to_string(), eligible: 5, required: 8 };
        let text = err.display_detailed();
        assert!(text.contains("G002"));
        assert!(text.contains("5 eligible < 8 required"));
        let err = GenerationError::AttemptsExhausted {
            attempts: 10,
            last_rejection: Some(Rejection::TooFewWords { placed: 5, required: 8 }),
            best_effort: None,
        };
        assert!(err.display_detailed().contains("V001"));
    }

    #[test]
    fn test_stats_averages() {
        let mut stats = GenerationStats::default();
        assert_eq!(stats.avg_generation_time(), Duration::ZERO);
        stats.record(true, Duration::from_millis(30));
        stats.record(false, Duration::from_millis(10));
        assert_eq!(stats.avg_generation_time(), Duration::from_millis(20));
        assert!((stats.success_rate() - 0.5).abs() < f64::EPSILON);
    }
}
