//! Read-only acceptance test for a finished grid.
//!
//! [`validate`] runs every check and returns the first [`Rejection`];
//! [`validate_all`] collects them all (useful for diagnostics). Nothing here
//! mutates or repairs the grid. A rejected attempt is thrown away by the
//! builder and a fresh one started.
//!
//! Density and grid size are measured on the bounding rectangle of the
//! letters, so the verdict is the same before and after cropping.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use crate::grid::{Direction, Grid, PlacedWord};

/// Thresholds a grid must meet to be accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRules {
    /// Fewest words a puzzle may hold.
    pub min_words: usize,
    /// Density must be strictly greater than this...
    pub min_density: f64,
    /// ...and strictly less than this.
    pub max_density: f64,
    pub min_word_length: usize,
    /// Smallest allowed side of the cropped grid.
    pub min_grid_side: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_words: 8,
            min_density: 0.30,
            max_density: 0.70,
            min_word_length: 3,
            min_grid_side: 6,
        }
    }
}

/// Why a grid was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("too few words: {placed} < {required}")]
    TooFewWords { placed: usize, required: usize },

    #[error("words are not connected: reached {reached} of {total} from the first word")]
    Disconnected { reached: usize, total: usize },

    #[error("fill density {density:.2} outside ({min:.2}, {max:.2})")]
    DensityOutOfBand { density: f64, min: f64, max: f64 },

    #[error("grid {rows}x{cols} is smaller than {min}x{min}")]
    GridTooSmall { rows: usize, cols: usize, min: usize },

    #[error("letters \"{text}\" at ({row}, {col}) {direction} do not form a placed word")]
    StrayRun { text: String, row: usize, col: usize, direction: Direction },

    #[error("word {word} expects '{expected}' at ({row}, {col}) but the grid holds {found:?}")]
    LetterConflict { word: String, row: usize, col: usize, expected: char, found: Option<char> },

    #[error("word {word} is placed more than once")]
    DuplicateWord { word: String },

    #[error("word {word} is shorter than {min} letters")]
    WordTooShort { word: String, min: usize },

    #[error("word {word} runs outside the grid")]
    OutOfBounds { word: String },

    #[error("letter '{letter}' at ({row}, {col}) belongs to no placed word")]
    UncoveredCell { row: usize, col: usize, letter: char },
}

impl Rejection {
    /// Returns the reason code for this rejection
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::TooFewWords { .. } => "V001",
            Rejection::Disconnected { .. } => "V002",
            Rejection::DensityOutOfBand { .. } => "V003",
            Rejection::GridTooSmall { .. } => "V004",
            Rejection::StrayRun { .. } => "V005",
            Rejection::LetterConflict { .. } => "V006",
            Rejection::DuplicateWord { .. } => "V007",
            Rejection::WordTooShort { .. } => "V008",
            Rejection::OutOfBounds { .. } => "V009",
            Rejection::UncoveredCell { .. } => "V010",
        }
    }

    /// Returns a short description of this rejection (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Rejection::TooFewWords { .. } => "Not enough words could be placed",
            Rejection::Disconnected { .. } => "The word graph has more than one component",
            Rejection::DensityOutOfBand { .. } => "Fill density outside the accepted band",
            Rejection::GridTooSmall { .. } => "Cropped grid is too small",
            Rejection::StrayRun { .. } => "Adjacent letters form a run that is not a word",
            Rejection::LetterConflict { .. } => "Grid letter disagrees with a placed word",
            Rejection::DuplicateWord { .. } => "The same word is placed twice",
            Rejection::WordTooShort { .. } => "A placed word is too short",
            Rejection::OutOfBounds { .. } => "A placed word leaves the grid",
            Rejection::UncoveredCell { .. } => "A letter outside every word",
        }
    }

    /// Returns detailed explanation of this rejection (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            Rejection::TooFewWords { .. } => "The placer could not find crossings for enough candidates in this attempt. The builder retries with a fresh sample.",
            Rejection::Disconnected { .. } => "Two words are adjacent when they share a cell. A breadth-first walk from the first word must reach every word.",
            Rejection::DensityOutOfBand { .. } => "Density is filled cells over the area of the letters' bounding rectangle. Too sparse wastes space; too dense is hard to solve.",
            Rejection::GridTooSmall { .. } => "Each side of the cropped grid must reach the configured minimum.",
            Rejection::StrayRun { .. } => "Every maximal horizontal or vertical run of two or more letters must be exactly one placed word. Words running side by side without crossing create such runs.",
            Rejection::LetterConflict { .. } => "A cell shared by two words holds a letter that does not match one of them. This indicates a placement bug.",
            Rejection::DuplicateWord { .. } => "Each word may appear in a puzzle at most once.",
            Rejection::WordTooShort { .. } => "Words shorter than the configured minimum make poor entries.",
            Rejection::OutOfBounds { .. } => "A placed word's span extends past the grid edge. This indicates a placement or cropping bug.",
            Rejection::UncoveredCell { .. } => "Every letter on the grid must lie on the span of at least one placed word. A lone letter forms no run, so only this check finds it.",
        }
    }

    /// Returns a helpful suggestion for this rejection
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            Rejection::TooFewWords { .. } => Some("Use a larger category or raise the candidate slack"),
            Rejection::DensityOutOfBand { .. } | Rejection::GridTooSmall { .. } => {
                Some("Adjust the working grid size; a smaller grid packs words more densely")
            }
            _ => None,
        }
    }

    /// Formats the rejection with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Summary numbers for a grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridStatistics {
    pub word_count: usize,
    pub horizontal_count: usize,
    pub vertical_count: usize,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub fill_density: f64,
    pub avg_word_length: f64,
    pub min_word_length: usize,
    pub max_word_length: usize,
}

/// Accept or reject `grid`, returning the first failed check.
///
/// # Errors
///
/// The first [`Rejection`] found.
pub fn validate(grid: &Grid, rules: &ValidationRules) -> Result<(), Rejection> {
    match validate_all(grid, rules).into_iter().next() {
        Some(rejection) => Err(rejection),
        None => Ok(()),
    }
}

#[must_use]
pub fn is_valid(grid: &Grid, rules: &ValidationRules) -> bool {
    validate(grid, rules).is_ok()
}

/// Every failed check, in a fixed order: integrity, words, structure, shape.
#[must_use]
pub fn validate_all(grid: &Grid, rules: &ValidationRules) -> Vec<Rejection> {
    let words = grid.placed_words();
    let mut rejections = check_letters(grid);

    if words.len() < rules.min_words {
        rejections.push(Rejection::TooFewWords { placed: words.len(), required: rules.min_words });
    }
    rejections.extend(check_words(words, rules.min_word_length));
    if let Err(r) = check_connected(words) {
        rejections.push(r);
    }
    rejections.extend(check_runs(grid));
    rejections.extend(check_coverage(grid));

    let density = grid.bounded_fill_density();
    if !(rules.min_density < density && density < rules.max_density) {
        rejections.push(Rejection::DensityOutOfBand {
            density,
            min: rules.min_density,
            max: rules.max_density,
        });
    }
    let (rows, cols) = grid.bounds().map_or((0, 0), |b| (b.rows(), b.cols()));
    if rows < rules.min_grid_side || cols < rules.min_grid_side {
        rejections.push(Rejection::GridTooSmall { rows, cols, min: rules.min_grid_side });
    }
    rejections
}

/// Every placed word's letters are on the grid where it says they are.
fn check_letters(grid: &Grid) -> Vec<Rejection> {
    let mut rejections = Vec::new();
    for placed in grid.placed_words() {
        for (row, col, expected) in placed.cells() {
            if row >= grid.rows() || col >= grid.cols() {
                rejections.push(Rejection::OutOfBounds { word: placed.word.clone() });
                break;
            }
            let found = grid.get(row, col);
            if found != Some(expected) {
                rejections.push(Rejection::LetterConflict {
                    word: placed.word.clone(),
                    row,
                    col,
                    expected,
                    found,
                });
            }
        }
    }
    rejections
}

fn check_words(words: &[PlacedWord], min_len: usize) -> Vec<Rejection> {
    let mut seen = HashSet::new();
    let mut rejections = Vec::new();
    for placed in words {
        if !seen.insert(placed.word.as_str()) {
            rejections.push(Rejection::DuplicateWord { word: placed.word.clone() });
        }
        if placed.len() < min_len {
            rejections.push(Rejection::WordTooShort { word: placed.word.clone(), min: min_len });
        }
    }
    rejections
}

/// Breadth-first walk over the "shares a cell" graph from the first word.
///
/// # Errors
///
/// [`Rejection::Disconnected`] if some word is not reached.
pub fn check_connected(words: &[PlacedWord]) -> Result<(), Rejection> {
    if words.len() <= 1 {
        return Ok(());
    }
    let adjacency: Vec<Vec<usize>> = (0..words.len())
        .map(|i| {
            (0..words.len())
                .filter(|&j| j != i && words[i].intersection_with(i, &words[j], j).is_some())
                .collect()
        })
        .collect();

    let mut visited = vec![false; words.len()];
    let mut queue = VecDeque::from([0]);
    visited[0] = true;
    let mut reached = 1;
    while let Some(current) = queue.pop_front() {
        for &next in &adjacency[current] {
            if !visited[next] {
                visited[next] = true;
                reached += 1;
                queue.push_back(next);
            }
        }
    }

    if reached == words.len() {
        Ok(())
    } else {
        Err(Rejection::Disconnected { reached, total: words.len() })
    }
}

/// Every maximal run of two or more letters must be exactly one placed word.
pub(crate) fn check_runs(grid: &Grid) -> Vec<Rejection> {
    let words: HashSet<(usize, usize, Direction, &str)> = grid
        .placed_words()
        .iter()
        .map(|p| (p.row, p.col, p.direction, p.word.as_str()))
        .collect();

    [Direction::Horizontal, Direction::Vertical]
        .into_iter()
        .flat_map(|direction| grid.letter_runs(direction))
        .filter(|run| {
            let p = run.placement;
            !words.contains(&(p.row, p.col, p.direction, run.text.as_str()))
        })
        .map(|run| Rejection::StrayRun {
            row: run.placement.row,
            col: run.placement.col,
            direction: run.placement.direction,
            text: run.text,
        })
        .collect()
}

/// Every letter lies on some placed word's span.
fn check_coverage(grid: &Grid) -> Vec<Rejection> {
    let covered: HashSet<(usize, usize)> = grid
        .placed_words()
        .iter()
        .flat_map(|p| p.cells().map(|(row, col, _)| (row, col)))
        .collect();
    (0..grid.rows())
        .flat_map(|row| (0..grid.cols()).map(move |col| (row, col)))
        .filter(|cell| !covered.contains(cell))
        .filter_map(|(row, col)| grid.get(row, col).map(|letter| Rejection::UncoveredCell { row, col, letter }))
        .collect()
}

#[must_use]
pub fn statistics(grid: &Grid) -> GridStatistics {
    let words = grid.placed_words();
    let horizontal_count = words.iter().filter(|w| w.direction == Direction::Horizontal).count();
    let lengths: Vec<usize> = words.iter().map(PlacedWord::len).collect();
    let (grid_rows, grid_cols) = grid.bounds().map_or((0, 0), |b| (b.rows(), b.cols()));
    GridStatistics {
        word_count: words.len(),
        horizontal_count,
        vertical_count: words.len() - horizontal_count,
        grid_rows,
        grid_cols,
        fill_density: grid.bounded_fill_density(),
        avg_word_length: if lengths.is_empty() {
            0.0
        } else {
            lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
        },
        min_word_length: lengths.iter().copied().min().unwrap_or(0),
        max_word_length: lengths.iter().copied().max().unwrap_or(0),
    }
}
