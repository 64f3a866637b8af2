//! The crossword grid: a bounded matrix of letters plus the words placed on it.
//!
//! The grid answers two questions for the placer:
//!
//! - [`Grid::can_place_word`]: is a word legal at `(row, col, direction)`?
//! - [`Grid::intersections`]: where could a word cross what is already there?
//!
//! A placement is legal when it stays inside the working bounds, agrees with
//! every letter it overlaps, and creates no letter run other than itself.
//! Concretely, the cells just before and just after the word must be empty,
//! every newly written cell must have empty neighbours on both sides
//! (perpendicular to the word), and every reused cell must belong to a word
//! running the other way. Together these keep every maximal run of two or more
//! letters equal to exactly one placed word.
//!
//! Coordinates are zero-based `(row, col)`; rows grow downwards.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alphabet::letter_count;

/// A grid cell: a letter or nothing.
pub type Cell = Option<char>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    #[must_use]
    pub fn perpendicular(self) -> Direction {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    /// The cell `offset` steps from `(row, col)` along this direction.
    #[inline]
    #[must_use]
    pub fn advance(self, row: usize, col: usize, offset: usize) -> (usize, usize) {
        match self {
            Direction::Horizontal => (row, col + offset),
            Direction::Vertical => (row + offset, col),
        }
    }

    /// Unit step `(d_row, d_col)` along this direction.
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A start cell and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl Placement {
    #[must_use]
    pub fn new(row: usize, col: usize, direction: Direction) -> Self {
        Self { row, col, direction }
    }

    #[inline]
    #[must_use]
    pub fn cell(&self, offset: usize) -> (usize, usize) {
        self.direction.advance(self.row, self.col, offset)
    }
}

/// A word committed to the grid.
///
/// Only [`Grid::place_word`] creates these. After that the start cell moves
/// only when the grid is cropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWord {
    pub word: String,
    pub clue: String,
    pub hint: String,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    length: usize,
}

impl PlacedWord {
    /// Word length in letters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        Placement::new(self.row, self.col, self.direction)
    }

    /// `(row, col, letter)` for every cell of the word, in reading order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.word.chars().enumerate().map(move |(i, ch)| {
            let (r, c) = self.direction.advance(self.row, self.col, i);
            (r, c, ch)
        })
    }

    /// Offset within this word of `(row, col)`, if the word covers it.
    #[must_use]
    pub fn offset_of(&self, row: usize, col: usize) -> Option<usize> {
        match self.direction {
            Direction::Horizontal if row == self.row && (self.col..self.col + self.length).contains(&col) => {
                Some(col - self.col)
            }
            Direction::Vertical if col == self.col && (self.row..self.row + self.length).contains(&row) => {
                Some(row - self.row)
            }
            _ => None,
        }
    }

    /// First cell shared with `other`, as an [`Intersection`] between word `self_index` and `other_index`.
    #[must_use]
    pub fn intersection_with(&self, self_index: usize, other: &PlacedWord, other_index: usize) -> Option<Intersection> {
        self.cells().enumerate().find_map(|(offset, (row, col, letter))| {
            other.offset_of(row, col).map(|other_offset| Intersection {
                row,
                col,
                letter,
                words: (self_index, other_index),
                offsets: (offset, other_offset),
            })
        })
    }
}

/// A cell where two words cross. Computed on demand, never stored.
///
/// `words` are indices into [`Grid::placed_words`]; for a candidate produced
/// by [`Grid::intersections`] the second index is the one the new word will
/// get once committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intersection {
    pub row: usize,
    pub col: usize,
    pub letter: char,
    pub words: (usize, usize),
    pub offsets: (usize, usize),
}

/// A legal placement for a word, together with the crossing that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub placement: Placement,
    pub intersection: Intersection,
}

/// Inclusive bounding rectangle of the letters on a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl Bounds {
    #[must_use]
    pub fn rows(&self) -> usize {
        self.bottom - self.top + 1
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.right - self.left + 1
    }

    #[must_use]
    pub fn area(&self) -> usize {
        self.rows() * self.cols()
    }
}

/// A maximal horizontal or vertical run of two or more letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterRun {
    pub placement: Placement,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
    placed: Vec<PlacedWord>,
}

impl Grid {
    /// An empty `size`×`size` working grid.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            rows: size,
            cols: size,
            cells: vec![vec![None; size]; size],
            placed: Vec::new(),
        }
    }

    /// An empty `rows`×`cols` grid, e.g. to replay a cropped puzzle.
    #[must_use]
    pub fn with_dimensions(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![None; cols]; rows],
            placed: Vec::new(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn placed_words(&self) -> &[PlacedWord] {
        &self.placed
    }

    /// The letter at `(row, col)`; out-of-bounds reads as empty.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// The letter one step `(d_row, d_col)` away, empty if that leaves the grid.
    fn neighbour(&self, row: usize, col: usize, d_row: isize, d_col: isize) -> Cell {
        match (row.checked_add_signed(d_row), col.checked_add_signed(d_col)) {
            (Some(r), Some(c)) => self.get(r, c),
            _ => None,
        }
    }

    /// Is `(row, col)` covered by an already placed word running in `direction`?
    fn covered_by(&self, row: usize, col: usize, direction: Direction) -> bool {
        self.placed
            .iter()
            .any(|p| p.direction == direction && p.offset_of(row, col).is_some())
    }

    /// Can `word` be placed starting at `(row, col)` running in `direction`?
    ///
    /// Never errors; an illegal placement is simply `false`.
    #[must_use]
    pub fn can_place_word(&self, word: &str, row: usize, col: usize, direction: Direction) -> bool {
        let len = letter_count(word);
        if len == 0 {
            return false;
        }
        let (end_row, end_col) = direction.advance(row, col, len - 1);
        if end_row >= self.rows || end_col >= self.cols {
            return false;
        }

        // no letter may touch either end of the word
        let (d_row, d_col) = direction.step();
        if self.neighbour(row, col, -d_row, -d_col).is_some()
            || self.neighbour(end_row, end_col, d_row, d_col).is_some()
        {
            return false;
        }

        let (side_row, side_col) = direction.perpendicular().step();
        for (i, ch) in word.chars().enumerate() {
            let (r, c) = direction.advance(row, col, i);
            match self.cells[r][c] {
                Some(existing) if existing != ch => return false,
                // reused cell: must be a crossing, never an overlap with a parallel word
                Some(_) => {
                    if self.covered_by(r, c, direction) {
                        return false;
                    }
                }
                // new cell: nothing alongside it
                None => {
                    if self.neighbour(r, c, -side_row, -side_col).is_some()
                        || self.neighbour(r, c, side_row, side_col).is_some()
                    {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Number of cells of `word` at `placement` that already hold the matching letter.
    #[must_use]
    pub fn crossing_count(&self, word: &str, placement: Placement) -> usize {
        word.chars()
            .enumerate()
            .filter(|&(i, ch)| {
                let (r, c) = placement.cell(i);
                self.get(r, c) == Some(ch)
            })
            .count()
    }

    /// Every legal placement of `word` that crosses a letter already on the grid.
    ///
    /// Placed words are visited in placement order, then their letters, then
    /// the letters of `word`, so the sequence is deterministic for a given grid.
    /// A placement reachable through several crossings is yielded once.
    pub fn intersections<'a>(&'a self, word: &'a str) -> impl Iterator<Item = Candidate> + 'a {
        let new_index = self.placed.len();
        let mut seen = HashSet::new();
        self.placed
            .iter()
            .enumerate()
            .flat_map(move |(placed_index, placed)| {
                placed.cells().enumerate().flat_map(move |(placed_offset, (row, col, letter))| {
                    word.chars()
                        .enumerate()
                        .filter(move |&(_, ch)| ch == letter)
                        .filter_map(move |(word_offset, _)| {
                            let direction = placed.direction.perpendicular();
                            let placement = match direction {
                                Direction::Vertical => Placement::new(row.checked_sub(word_offset)?, col, direction),
                                Direction::Horizontal => Placement::new(row, col.checked_sub(word_offset)?, direction),
                            };
                            Some(Candidate {
                                placement,
                                intersection: Intersection {
                                    row,
                                    col,
                                    letter,
                                    words: (placed_index, new_index),
                                    offsets: (placed_offset, word_offset),
                                },
                            })
                        })
                })
            })
            .filter(move |c| {
                let p = c.placement;
                self.can_place_word(word, p.row, p.col, p.direction)
            })
            .filter(move |c| seen.insert(c.placement))
    }

    /// Commit `word` at `(row, col, direction)`.
    ///
    /// The caller must have checked the placement with [`Grid::can_place_word`];
    /// committing an illegal placement is a bug, caught by a debug assertion.
    pub fn place_word(&mut self, word: &str, clue: &str, hint: &str, row: usize, col: usize, direction: Direction) {
        debug_assert!(
            self.can_place_word(word, row, col, direction),
            "illegal placement of {word} at ({row}, {col}) {direction}"
        );
        self.write_word(word, clue, hint, row, col, direction);
    }

    /// Commit without the legality check. Every cell of the span must be inside the grid.
    pub(crate) fn write_word(&mut self, word: &str, clue: &str, hint: &str, row: usize, col: usize, direction: Direction) {
        for (i, ch) in word.chars().enumerate() {
            let (r, c) = direction.advance(row, col, i);
            self.cells[r][c] = Some(ch);
        }
        self.placed.push(PlacedWord {
            word: word.to_string(),
            clue: clue.to_string(),
            hint: hint.to_string(),
            row,
            col,
            direction,
            length: letter_count(word),
        });
    }

    /// Write a word without any legality check, to build malformed grids in tests.
    #[cfg(test)]
    pub(crate) fn place_unchecked(&mut self, word: &str, row: usize, col: usize, direction: Direction) {
        self.write_word(word, "", "", row, col, direction);
    }

    /// Set one cell without recording a word, to build malformed grids in tests.
    #[cfg(test)]
    pub(crate) fn set_cell(&mut self, row: usize, col: usize, letter: char) {
        self.cells[row][col] = Some(letter);
    }

    /// Bounding rectangle of all letters, `None` on an empty grid.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.is_none() {
                    continue;
                }
                bounds = Some(match bounds {
                    None => Bounds { top: r, left: c, bottom: r, right: c },
                    Some(b) => Bounds {
                        top: b.top.min(r),
                        left: b.left.min(c),
                        bottom: b.bottom.max(r),
                        right: b.right.max(c),
                    },
                });
            }
        }
        bounds
    }

    /// Shrink the grid to the bounding rectangle of its letters and shift every
    /// placed word by the crop offset. Returns the new `(rows, cols)`.
    ///
    /// Idempotent. An empty grid crops to `0`×`0`.
    pub fn crop_empty_edges(&mut self) -> (usize, usize) {
        let Some(b) = self.bounds() else {
            self.rows = 0;
            self.cols = 0;
            self.cells.clear();
            return (0, 0);
        };

        self.cells = self.cells[b.top..=b.bottom]
            .iter()
            .map(|row| row[b.left..=b.right].to_vec())
            .collect();
        for placed in &mut self.placed {
            placed.row -= b.top;
            placed.col -= b.left;
        }
        self.rows = b.rows();
        self.cols = b.cols();
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Filled cells over all cells of the current matrix.
    #[must_use]
    pub fn fill_density(&self) -> f64 {
        let total = self.rows * self.cols;
        if total == 0 {
            0.0
        } else {
            self.filled_cells() as f64 / total as f64
        }
    }

    /// Filled cells over the area of the letters' bounding rectangle.
    ///
    /// Equals [`Grid::fill_density`] after cropping, without mutating.
    #[must_use]
    pub fn bounded_fill_density(&self) -> f64 {
        match self.bounds() {
            Some(b) => self.filled_cells() as f64 / b.area() as f64,
            None => 0.0,
        }
    }

    /// Maximal runs of two or more letters running in `direction`.
    #[must_use]
    pub fn letter_runs(&self, direction: Direction) -> Vec<LetterRun> {
        let (lines, line_len) = match direction {
            Direction::Horizontal => (self.rows, self.cols),
            Direction::Vertical => (self.cols, self.rows),
        };
        let at = |line: usize, pos: usize| match direction {
            Direction::Horizontal => (line, pos),
            Direction::Vertical => (pos, line),
        };

        let mut runs = Vec::new();
        for line in 0..lines {
            let mut pos = 0;
            while pos < line_len {
                let (r, c) = at(line, pos);
                if self.cells[r][c].is_none() {
                    pos += 1;
                    continue;
                }
                let start = pos;
                let mut text = String::new();
                while pos < line_len {
                    let (r, c) = at(line, pos);
                    match self.cells[r][c] {
                        Some(ch) => text.push(ch),
                        None => break,
                    }
                    pos += 1;
                }
                if pos - start >= 2 {
                    let (row, col) = at(line, start);
                    runs.push(LetterRun { placement: Placement::new(row, col, direction), text });
                }
            }
        }
        runs
    }

    /// Rows of one-letter strings, `""` for empty cells.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.map(String::from).unwrap_or_default()).collect())
            .collect()
    }

    /// Text rendering with `empty` standing in for empty cells.
    #[must_use]
    pub fn render(&self, empty: char) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.unwrap_or(empty)).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Direction::{Horizontal, Vertical};

    /// ЭНЕРГИЯ across row 5, ФИЗИКА down through its И.
    fn seeded_grid() -> Grid {
        let mut g = Grid::new(10);
        g.place_word("ЭНЕРГИЯ", "clue", "hint", 5, 1, Horizontal);
        g.place_word("ФИЗИКА", "clue", "hint", 4, 6, Vertical);
        g
    }

    #[test]
    fn test_place_word_writes_letters_and_records() {
        let g = seeded_grid();
        assert_eq!(g.get(5, 1), Some('Э'));
        assert_eq!(g.get(5, 6), Some('И'));
        assert_eq!(g.get(9, 6), Some('А'));
        assert_eq!(g.placed_words().len(), 2);
        let p = &g.placed_words()[1];
        assert_eq!((p.row, p.col, p.direction, p.len()), (4, 6, Vertical, 6));
        assert_eq!(g.filled_cells(), 7 + 5);
    }

    #[test]
    fn test_get_out_of_bounds_is_empty() {
        let g = seeded_grid();
        assert_eq!(g.get(10, 0), None);
        assert_eq!(g.get(0, 99), None);
    }

    #[test]
    fn test_can_place_rejects_out_of_bounds() {
        let g = Grid::new(5);
        assert!(g.can_place_word("АТОМ", 0, 1, Horizontal));
        assert!(!g.can_place_word("АТОМ", 0, 2, Horizontal));
        assert!(!g.can_place_word("АТОМ", 2, 0, Vertical));
        assert!(!g.can_place_word("АТОМ", 5, 0, Horizontal));
        assert!(!g.can_place_word("", 0, 0, Horizontal));
    }

    #[test]
    fn test_can_place_rejects_conflicting_letter() {
        let g = seeded_grid();
        // МИР down column 4 would put И on the Р
        assert!(!g.can_place_word("МИР", 4, 4, Vertical));
        // РОБОТ down from the Р of ЭНЕРГИЯ is fine
        assert!(g.can_place_word("РОБОТ", 5, 4, Vertical));
    }

    #[test]
    fn test_can_place_rejects_touching_ends() {
        let g = seeded_grid();
        // would end right on top of the Э at (5, 1)
        assert!(!g.can_place_word("СВЕТ", 1, 1, Vertical));
        assert!(g.can_place_word("СВЕТ", 0, 1, Vertical));
        let mut g2 = Grid::new(10);
        g2.place_word("АТОМ", "", "", 0, 0, Horizontal);
        assert!(!g2.can_place_word("МИР", 0, 4, Horizontal));
    }

    #[test]
    fn test_can_place_rejects_parallel_neighbours() {
        let g = seeded_grid();
        // directly under ЭНЕРГИЯ with no crossing
        assert!(!g.can_place_word("СВЕТ", 6, 1, Horizontal));
        // alongside ФИЗИКА
        assert!(!g.can_place_word("МИР", 7, 7, Vertical));
        // far away is fine
        assert!(g.can_place_word("СВЕТ", 0, 0, Horizontal));
    }

    #[test]
    fn test_can_place_rejects_parallel_overlap() {
        let g = seeded_grid();
        // ends are open but every cell belongs to a horizontal word
        assert!(!g.can_place_word("ЭНЕРГИЯ", 5, 1, Horizontal));
    }

    #[test]
    fn test_intersections_are_legal_and_cross() {
        let g = seeded_grid();
        let candidates: Vec<Candidate> = g.intersections("РОБОТ").collect();
        assert!(!candidates.is_empty());
        for c in &candidates {
            let p = c.placement;
            assert!(g.can_place_word("РОБОТ", p.row, p.col, p.direction));
            assert_eq!(g.get(c.intersection.row, c.intersection.col), Some(c.intersection.letter));
            assert_eq!(p.cell(c.intersection.offsets.1), (c.intersection.row, c.intersection.col));
            assert_eq!(c.intersection.words.1, 2);
        }
        assert!(candidates.iter().any(|c| c.placement == Placement::new(5, 4, Vertical)));
    }

    #[test]
    fn test_intersections_are_unique_and_deterministic() {
        let g = seeded_grid();
        let a: Vec<Placement> = g.intersections("ВОЛНА").map(|c| c.placement).collect();
        let b: Vec<Placement> = g.intersections("ВОЛНА").map(|c| c.placement).collect();
        assert_eq!(a, b);
        let unique: HashSet<Placement> = a.iter().copied().collect();
        assert_eq!(unique.len(), a.len());
    }

    #[test]
    fn test_intersections_empty_without_shared_letters() {
        let mut g = Grid::new(10);
        g.place_word("ЩУКА", "", "", 5, 2, Horizontal);
        assert_eq!(g.intersections("МИР").count(), 0);
    }

    #[test]
    fn test_intersections_skip_negative_starts() {
        let mut g = Grid::new(10);
        g.place_word("МИР", "", "", 0, 0, Horizontal);
        // РОБОТ could only cross the Р of МИР by starting at row 0 going down
        let found: Vec<Placement> = g.intersections("РОБОТ").map(|c| c.placement).collect();
        assert_eq!(found, vec![Placement::new(0, 2, Vertical)]);
    }

    #[test]
    fn test_crossing_count() {
        let g = seeded_grid();
        assert_eq!(g.crossing_count("РОБОТ", Placement::new(5, 4, Vertical)), 1);
        assert_eq!(g.crossing_count("РОБОТ", Placement::new(0, 0, Horizontal)), 0);
    }

    #[test]
    fn test_crop_shifts_words() {
        let mut g = seeded_grid();
        let dims = g.crop_empty_edges();
        assert_eq!(dims, (6, 7));
        assert_eq!((g.rows(), g.cols()), (6, 7));
        let energy = &g.placed_words()[0];
        assert_eq!((energy.row, energy.col), (1, 0));
        let physics = &g.placed_words()[1];
        assert_eq!((physics.row, physics.col), (0, 5));
        for placed in g.placed_words() {
            for (r, c, ch) in placed.cells() {
                assert_eq!(g.get(r, c), Some(ch));
            }
        }
    }

    #[test]
    fn test_crop_is_idempotent() {
        let mut once = seeded_grid();
        once.crop_empty_edges();
        let mut twice = once.clone();
        twice.crop_empty_edges();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_crop_empty_grid() {
        let mut g = Grid::new(4);
        assert_eq!(g.crop_empty_edges(), (0, 0));
        assert_eq!(g.crop_empty_edges(), (0, 0));
        assert_eq!(g.fill_density(), 0.0);
    }

    #[test]
    fn test_densities() {
        let g = seeded_grid();
        assert!((g.fill_density() - 0.12).abs() < 1e-9);
        let mut cropped = g.clone();
        cropped.crop_empty_edges();
        assert!((g.bounded_fill_density() - cropped.fill_density()).abs() < 1e-9);
        assert!((cropped.fill_density() - 12.0 / 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_letter_runs_match_words() {
        let g = seeded_grid();
        let across = g.letter_runs(Horizontal);
        assert_eq!(across.len(), 1);
        assert_eq!(across[0].text, "ЭНЕРГИЯ");
        assert_eq!(across[0].placement, Placement::new(5, 1, Horizontal));
        let down = g.letter_runs(Vertical);
        assert_eq!(down.len(), 1);
        assert_eq!(down[0].text, "ФИЗИКА");
    }

    #[test]
    fn test_intersection_with() {
        let g = seeded_grid();
        let words = g.placed_words();
        let x = words[0].intersection_with(0, &words[1], 1).unwrap();
        assert_eq!((x.row, x.col, x.letter), (5, 6, 'И'));
        assert_eq!(x.offsets, (5, 1));
    }

    #[test]
    fn test_render_and_rows() {
        let mut g = Grid::new(3);
        g.place_word("МИР", "", "", 1, 0, Horizontal);
        assert_eq!(g.to_string(), "...\nМИР\n...");
        assert_eq!(g.to_rows()[1], vec!["М", "И", "Р"]);
        assert_eq!(g.to_rows()[0], vec!["", "", ""]);
    }
}
