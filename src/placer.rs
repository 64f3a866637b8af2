//! Turns a list of candidate words into a populated [`Grid`].
//!
//! Candidates are ranked longest first (ties: more common letters first). The
//! top-ranked word is laid horizontally through the middle of the empty grid;
//! every later word must cross something already placed. For each word the
//! placer asks the grid for its legal crossings, ranks them by
//! [`placement_score`], and picks uniformly among the best [`TOP_CHOICES`].
//! That random pick is the only source of variety between runs, and it comes
//! from the RNG handed to [`WordPlacer::new`], so a fixed seed reproduces a
//! grid exactly.
//!
//! A word with no legal crossing is not an error. It is deferred and tried
//! again on the next sweep, as long as the previous sweep placed something.

use std::cmp::Reverse;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::alphabet::{common_letter_score, letter_count};
use crate::dictionary::WordEntry;
use crate::grid::{Candidate, Direction, Grid, Placement};

/// Number of best-scoring positions the random pick chooses among.
pub const TOP_CHOICES: usize = 3;

/// Weight of one crossing relative to one cell of distance from the centre.
const CROSSING_WEIGHT: i64 = 10;

/// What one placement run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementReport {
    /// Words committed, in placement order.
    pub placed: Vec<String>,
    /// Candidates that never found a legal crossing (or were not needed).
    pub unplaced: Vec<String>,
    /// Sweeps over the pending list after the seed word.
    pub sweeps: usize,
}

/// Rank candidates for placement: longer words first, then words with more common letters.
///
/// The sort is stable, so equal words keep their input order.
#[must_use]
pub fn rank_candidates(candidates: &[WordEntry]) -> Vec<&WordEntry> {
    let mut ranked: Vec<&WordEntry> = candidates.iter().collect();
    ranked.sort_by_key(|e| (Reverse(letter_count(&e.word)), Reverse(common_letter_score(&e.word))));
    ranked
}

/// Heuristic quality of a legal placement: crossings count most, then closeness to the centre.
#[must_use]
pub fn placement_score(grid: &Grid, word: &str, placement: Placement) -> i64 {
    let crossings = grid.crossing_count(word, placement) as i64;
    let distance = placement.row.abs_diff(grid.rows() / 2) + placement.col.abs_diff(grid.cols() / 2);
    crossings * CROSSING_WEIGHT - distance as i64
}

pub struct WordPlacer<R> {
    rng: R,
}

impl<R: Rng> WordPlacer<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Give the RNG back, e.g. to keep drawing from the same stream.
    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Lay the top-ranked candidate horizontally, centred on the empty `grid`.
    ///
    /// Returns `false` (and leaves the grid untouched) if it does not fit.
    pub fn place_seed_word(&mut self, grid: &mut Grid, entry: &WordEntry) -> bool {
        debug_assert!(grid.placed_words().is_empty(), "seed word on a non-empty grid");
        let len = letter_count(&entry.word);
        if len > grid.cols() {
            return false;
        }
        let row = grid.rows() / 2;
        let col = (grid.cols() - len) / 2;
        if !grid.can_place_word(&entry.word, row, col, Direction::Horizontal) {
            return false;
        }
        grid.place_word(&entry.word, &entry.clue, &entry.hint, row, col, Direction::Horizontal);
        true
    }

    /// Choose where `word` goes among its legal crossings, or `None` if it has none.
    pub fn choose_position(&mut self, grid: &Grid, word: &str) -> Option<Placement> {
        let mut scored: Vec<(i64, Candidate)> = grid
            .intersections(word)
            .map(|c| (placement_score(grid, word, c.placement), c))
            .collect();
        if scored.is_empty() {
            return None;
        }
        scored.sort_by_key(|&(score, _)| Reverse(score));
        scored.truncate(TOP_CHOICES);
        scored.choose(&mut self.rng).map(|&(_, c)| c.placement)
    }

    /// Populate `grid` from `candidates` until `target` words are placed or
    /// no pending word can be placed any more.
    pub fn place_all(&mut self, grid: &mut Grid, candidates: &[WordEntry], target: usize) -> PlacementReport {
        let mut report = PlacementReport::default();
        let ranked = rank_candidates(candidates);
        let Some((seed, rest)) = ranked.split_first() else {
            return report;
        };
        if target == 0 || !self.place_seed_word(grid, seed) {
            report.unplaced = ranked.iter().map(|e| e.word.clone()).collect();
            return report;
        }
        report.placed.push(seed.word.clone());

        let mut pending: Vec<&WordEntry> = rest.to_vec();
        while grid.placed_words().len() < target && !pending.is_empty() {
            report.sweeps += 1;
            let mut progress = false;
            let mut deferred = Vec::new();
            for entry in pending {
                if grid.placed_words().len() >= target {
                    deferred.push(entry);
                    continue;
                }
                match self.choose_position(grid, &entry.word) {
                    Some(p) => {
                        grid.place_word(&entry.word, &entry.clue, &entry.hint, p.row, p.col, p.direction);
                        report.placed.push(entry.word.clone());
                        progress = true;
                    }
                    None => deferred.push(entry),
                }
            }
            pending = deferred;
            if !progress {
                break;
            }
        }

        debug!(
            "placed {}/{} words in {} sweeps (target {target})",
            report.placed.len(),
            candidates.len(),
            report.sweeps
        );
        report.unplaced = pending.into_iter().map(|e| e.word.clone()).collect();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entries(words: &[&str]) -> Vec<WordEntry> {
        words.iter().map(|w| WordEntry::new(w, "clue", "hint")).collect()
    }

    const POOL: [&str; 8] = ["АТОМ", "ЛАЗЕР", "МИР", "РОБОТ", "СВЕТ", "ВОЛНА", "ЭНЕРГИЯ", "ФИЗИКА"];

    #[test]
    fn test_rank_by_length_then_common_letters() {
        let pool = entries(&["МИР", "ЩУКА", "СВЕТ", "ЭНЕРГИЯ"]);
        let ranked: Vec<&str> = rank_candidates(&pool).iter().map(|e| e.word.as_str()).collect();
        // СВЕТ (4 common) beats ЩУКА (У, К, А) at equal length
        assert_eq!(ranked, vec!["ЭНЕРГИЯ", "СВЕТ", "ЩУКА", "МИР"]);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let pool = entries(&["ТОН", "НОТ", "ОНТ"]);
        let ranked: Vec<&str> = rank_candidates(&pool).iter().map(|e| e.word.as_str()).collect();
        assert_eq!(ranked, vec!["ТОН", "НОТ", "ОНТ"]);
    }

    #[test]
    fn test_seed_word_is_centred_horizontally() {
        let mut grid = Grid::new(13);
        let mut placer = WordPlacer::new(StdRng::seed_from_u64(1));
        let report = placer.place_all(&mut grid, &entries(&POOL), 1);
        assert_eq!(report.placed, vec!["ЭНЕРГИЯ"]);
        let seed = &grid.placed_words()[0];
        assert_eq!((seed.row, seed.col, seed.direction), (6, 3, Direction::Horizontal));
    }

    #[test]
    fn test_seed_word_too_long_places_nothing() {
        let mut grid = Grid::new(5);
        let mut placer = WordPlacer::new(StdRng::seed_from_u64(1));
        let report = placer.place_all(&mut grid, &entries(&POOL), 8);
        assert!(report.placed.is_empty());
        assert_eq!(report.unplaced.len(), 8);
        assert!(grid.placed_words().is_empty());
    }

    #[test]
    fn test_empty_candidates() {
        let mut grid = Grid::new(10);
        let mut placer = WordPlacer::new(StdRng::seed_from_u64(1));
        let report = placer.place_all(&mut grid, &[], 8);
        assert_eq!(report, PlacementReport::default());
    }

    #[test]
    fn test_stops_at_target() {
        let mut grid = Grid::new(13);
        let mut placer = WordPlacer::new(StdRng::seed_from_u64(7));
        let report = placer.place_all(&mut grid, &entries(&POOL), 3);
        assert!(grid.placed_words().len() <= 3);
        assert_eq!(report.placed.len(), grid.placed_words().len());
        assert_eq!(report.placed.len() + report.unplaced.len(), POOL.len());
    }

    #[test]
    fn test_unconnectable_word_is_skipped_not_fatal() {
        // ЩУЧЬ shares no letter with anything else
        let mut grid = Grid::new(13);
        let mut placer = WordPlacer::new(StdRng::seed_from_u64(3));
        let report = placer.place_all(&mut grid, &entries(&["ЭНЕРГИЯ", "ЩУЧЬ", "МИР"]), 3);
        assert!(report.unplaced.contains(&"ЩУЧЬ".to_string()));
        assert!(report.placed.contains(&"МИР".to_string()));
    }

    #[test]
    fn test_every_placed_word_crosses_another() {
        let mut grid = Grid::new(13);
        let mut placer = WordPlacer::new(StdRng::seed_from_u64(11));
        placer.place_all(&mut grid, &entries(&POOL), 8);
        let words = grid.placed_words();
        for (i, w) in words.iter().enumerate().skip(1) {
            let crosses = words[..i].iter().enumerate().any(|(j, o)| w.intersection_with(i, o, j).is_some());
            assert!(crosses, "{} does not cross an earlier word", w.word);
        }
    }

    #[test]
    fn test_same_seed_same_grid() {
        let run = |seed| {
            let mut grid = Grid::new(13);
            let mut placer = WordPlacer::new(StdRng::seed_from_u64(seed));
            placer.place_all(&mut grid, &entries(&POOL), 8);
            grid
        };
        assert_eq!(run(42), run(42));
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn test_choose_position_prefers_best_scores() {
        let mut grid = Grid::new(13);
        grid.place_word("ЭНЕРГИЯ", "", "", 6, 3, Direction::Horizontal);
        let mut all: Vec<i64> = grid
            .intersections("ЛАЗЕР")
            .map(|c| placement_score(&grid, "ЛАЗЕР", c.placement))
            .collect();
        all.sort_unstable_by(|a, b| b.cmp(a));
        let threshold = all[all.len().min(TOP_CHOICES) - 1];

        let mut placer = WordPlacer::new(StdRng::seed_from_u64(5));
        for _ in 0..20 {
            let p = placer.choose_position(&grid, "ЛАЗЕР").unwrap();
            assert!(placement_score(&grid, "ЛАЗЕР", p) >= threshold);
        }
    }

    #[test]
    fn test_placement_score() {
        let mut grid = Grid::new(13);
        grid.place_word("ЭНЕРГИЯ", "", "", 6, 3, Direction::Horizontal);
        // РОБОТ down from the Р at (6, 6): one crossing, distance 0
        assert_eq!(placement_score(&grid, "РОБОТ", Placement::new(6, 6, Direction::Vertical)), 10);
        assert_eq!(placement_score(&grid, "РОБОТ", Placement::new(0, 0, Direction::Horizontal)), -12);
    }
}
