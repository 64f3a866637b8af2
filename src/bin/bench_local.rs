//! `bench_local.rs`: quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing of puzzle generation on *your* machine.
//! - Loads the dictionary once, then builds puzzles for one category at every
//!   difficulty several times and reports the median.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Another category:               `cargo run --bin bench_local --release -- -c История`
//! - Print the last grid per tier:   `cargo run --bin bench_local --release -- -p`
//!
//! NOTES
//! -----
//! - This is *not* Criterion. It's quick and convenient, not statistically rigorous.
//! - Runs are seeded (`--seed`, incremented per repeat), so numbers are comparable across builds.
//! - One warm-up run per tier is done (not included in timing).

use clap::Parser;
use std::hint::black_box;
use std::time::Instant;

use crossforge::builder::{GenerationOptions, Puzzle, PuzzleBuilder};
use crossforge::dictionary::Dictionary;
use crossforge::difficulty::Difficulty;

/// Simple local benchmark runner: load the dictionary once, time generation per difficulty.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the dictionary file
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/dictionary.json")
    )]
    dictionary: String,

    /// Category to generate for
    #[arg(short, long, default_value = "Космос")]
    category: String,

    /// Number of repeats per tier (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 3)]
    num_repeats: usize,

    /// First seed; repeat `i` uses `seed + i`
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Print the last successful grid per tier
    #[arg(short = 'p', long = "print")]
    print_grid: bool,
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// One row in the summary: (tier, median seconds, successes, mean attempts).
    type SummaryRow = (Difficulty, f64, usize, f64);

    let cli = Cli::parse();

    // Load the dictionary once. This I/O is *not* included in timing.
    eprintln!("Loading dictionary from: {}", cli.dictionary);
    let t_load = Instant::now();
    let dictionary = Dictionary::load_from_path(&cli.dictionary)?;
    eprintln!(
        "Loaded {} words in {:.3}s",
        dictionary.total_word_count(),
        t_load.elapsed().as_secs_f64()
    );

    let mut summary: Vec<SummaryRow> = Vec::with_capacity(Difficulty::ALL.len());
    for (idx, difficulty) in Difficulty::ALL.into_iter().enumerate() {
        eprintln!("\n[{:02}] {} / {difficulty}", idx + 1, cli.category);

        // One *warm-up* execution per tier; its timing is ignored.
        let mut warmup = PuzzleBuilder::seeded(&dictionary, GenerationOptions::default(), cli.seed);
        if let Err(e) = warmup.generate(&cli.category, difficulty) {
            eprintln!("  ✗ Warm-up failed: {}", e.display_detailed());
            continue;
        }

        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut attempts = Vec::with_capacity(cli.num_repeats);
        let mut last: Option<Puzzle> = None;
        for rep in 0..cli.num_repeats {
            let seed = cli.seed + rep as u64;
            let mut builder = PuzzleBuilder::seeded(&dictionary, GenerationOptions::default(), seed);

            let t_gen = Instant::now();
            let result = builder.generate(black_box(&cli.category), difficulty);
            let secs = t_gen.elapsed().as_secs_f64();
            times.push(secs);

            match result {
                Ok(puzzle) => {
                    eprintln!(
                        "  run {:>2}/{:>2}: {secs:.3}s ({} words, {}x{}, attempt {})",
                        rep + 1,
                        cli.num_repeats,
                        puzzle.metadata.word_count,
                        puzzle.metadata.grid_rows,
                        puzzle.metadata.grid_cols,
                        puzzle.metadata.attempts
                    );
                    attempts.push(puzzle.metadata.attempts as f64);
                    last = Some(puzzle);
                }
                Err(e) => eprintln!("  run {:>2}/{:>2}: {secs:.3}s ✗ {e}", rep + 1, cli.num_repeats),
            }
        }

        if cli.print_grid {
            if let Some(puzzle) = &last {
                println!("{}\n", puzzle.render('█')?);
            }
        }

        let med = median(times);
        let mean_attempts = if attempts.is_empty() {
            0.0
        } else {
            attempts.iter().sum::<f64>() / attempts.len() as f64
        };
        eprintln!("  → median {med:.3}s over {} run(s)", cli.num_repeats);
        summary.push((difficulty, med, attempts.len(), mean_attempts));
    }

    // Compact summary at the end for a quick scan across all tiers.
    eprintln!("\n==== Summary ====");
    eprintln!("{:<8} | {:>10} | {:>9} | {:>13}", "tier", "median (s)", "successes", "mean attempts");
    eprintln!("{:-<8}-+-{:-<10}-+-{:-<9}-+-{:-<13}", "", "", "", "");
    for (difficulty, med, successes, mean_attempts) in &summary {
        eprintln!(
            "{:<8} | {med:>10.3} | {successes:>9} | {mean_attempts:>13.1}",
            difficulty.as_str()
        );
    }

    Ok(())
}
