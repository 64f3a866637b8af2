use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crossforge::builder::{self, write_batch, GenerationError, GenerationOptions, Puzzle, PuzzleBuilder};
use crossforge::dictionary::{self, Dictionary, MIN_CATEGORY_SIZE};
use crossforge::difficulty::Difficulty;
use crossforge::errors::DictionaryError;
use crossforge::identity::{puzzle_id, ExhaustionPolicy};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Crossword generator
#[derive(Parser, Debug)]
#[command(author, version, long_version = LONG_VERSION, about, long_about = None)]
struct Cli {
    /// Path to the dictionary file (JSON: category -> [{word, clue, hint}])
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/dictionary.json")
    )]
    dictionary: PathBuf,

    /// Category to generate for (all available categories in batch mode if omitted)
    #[arg(short, long)]
    category: Option<String>,

    /// Difficulty tier
    #[arg(short = 'l', long = "level", value_enum, default_value_t = Difficulty::Medium)]
    level: Difficulty,

    /// Seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of puzzles per category
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Write puzzles as files into this directory instead of printing JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum attempts per puzzle
    #[arg(long, default_value_t = builder::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Words that must not appear (repeatable)
    #[arg(long = "exclude-word")]
    exclude_words: Vec<String>,

    /// Puzzle ids that must not be produced again (repeatable)
    #[arg(long = "exclude-id")]
    exclude_ids: Vec<String>,

    /// Tries when searching for a puzzle whose id is not excluded
    #[arg(long, default_value_t = 10)]
    unique_tries: usize,

    /// On failure, emit the best invalid attempt (or a known duplicate) instead of an error
    #[arg(long)]
    accept_best: bool,

    /// Print the grid to stderr
    #[arg(long)]
    render: bool,

    /// Only check the dictionary, then exit
    #[arg(long)]
    validate_only: bool,

    /// List categories with word counts, then exit
    #[arg(long)]
    list_categories: bool,

    /// Enable debug logging (same as setting CROSSFORGE_DEBUG)
    #[arg(long)]
    debug: bool,
}

/// Entry point of the crossforge CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    crossforge::log::init_logger(cli.debug || crossforge::log::debug_from_env());

    if let Err(e) = try_main(&cli) {
        if let Some(gen_err) = e.downcast_ref::<GenerationError>() {
            eprintln!("Error: {}", gen_err.display_detailed());
        } else if let Some(dict_err) = e.downcast_ref::<DictionaryError>() {
            eprintln!("Error: {}", dict_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        // Exit explicitly with a nonzero code so scripts can detect failure
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic.
///
/// 1. `--validate-only`: audit the dictionary and report every problem.
/// 2. Load the dictionary.
/// 3. `--list-categories`: print categories and exit.
/// 4. Without `--output`: build one puzzle and print it as JSON on stdout.
/// 5. With `--output`: build `count` puzzles per category into the directory.
fn try_main(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.validate_only {
        return validate_dictionary(cli);
    }

    let t_load = Instant::now();
    let dictionary = Dictionary::load_from_path(&cli.dictionary)?;
    log::debug!("Dictionary loaded in {:.3}s", t_load.elapsed().as_secs_f64());

    if cli.list_categories {
        for info in dictionary.categories_info() {
            let marker = if info.available { "" } else { " (unavailable)" };
            println!("{}: {} words{marker}", info.name, info.word_count);
        }
        return Ok(());
    }

    let options = GenerationOptions {
        max_attempts: cli.max_attempts,
        ..GenerationOptions::default()
    }
    .with_excluded_words(&cli.exclude_words);
    let mut builder = match cli.seed {
        Some(seed) => PuzzleBuilder::seeded(&dictionary, options, seed),
        None => PuzzleBuilder::new(&dictionary, options),
    };

    match &cli.output {
        Some(dir) => generate_batch(cli, &dictionary, &mut builder, dir),
        None => {
            let category = cli
                .category
                .as_deref()
                .ok_or("--category is required unless --output is given")?;
            let puzzle = generate_one(cli, &mut builder, category)?;
            if cli.render {
                eprintln!("{}", puzzle.render('█')?);
            }
            println!("{}", serde_json::to_string_pretty(&puzzle)?);
            Ok(())
        }
    }
}

fn generate_one(cli: &Cli, builder: &mut PuzzleBuilder<'_>, category: &str) -> Result<Puzzle, GenerationError> {
    let result = if cli.exclude_ids.is_empty() {
        builder.generate(category, cli.level)
    } else {
        let excluded: HashSet<String> = cli.exclude_ids.iter().cloned().collect();
        let policy = if cli.accept_best {
            ExhaustionPolicy::AcceptDuplicate
        } else {
            ExhaustionPolicy::Fail
        };
        builder
            .generate_unique(category, cli.level, &excluded, cli.unique_tries, policy)
            .map(|unique| {
                if unique.duplicate {
                    log::warn!("Emitting already known puzzle {}", unique.id);
                }
                unique.puzzle
            })
    };

    match result {
        Err(GenerationError::AttemptsExhausted { best_effort: Some(best), last_rejection, .. }) if cli.accept_best => {
            if let Some(r) = last_rejection {
                log::warn!("Emitting best invalid attempt: {}", r.display_detailed());
            }
            Ok(*best)
        }
        other => other,
    }
}

fn generate_batch(
    cli: &Cli,
    dictionary: &Dictionary,
    builder: &mut PuzzleBuilder<'_>,
    dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let categories: Vec<String> = match &cli.category {
        Some(c) => vec![c.clone()],
        None => dictionary
            .categories_info()
            .into_iter()
            .filter(|info| info.available)
            .map(|info| info.name)
            .collect(),
    };
    if categories.is_empty() {
        return Err(format!("no category has at least {MIN_CATEGORY_SIZE} words").into());
    }

    eprintln!("Generating {} x {} {} puzzles into {}", categories.len(), cli.count, cli.level, dir.display());
    let (mut written, mut failed) = (0, 0);
    for category in &categories {
        let outcome = match builder.generate_batch(category, cli.level, cli.count) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("  ✗ {category}: {}", e.display_detailed());
                continue;
            }
        };
        for path in write_batch(dir, &outcome.puzzles)? {
            eprintln!("  ✓ {}", path.display());
        }
        for puzzle in &outcome.puzzles {
            log::debug!("{}: id {}", category, puzzle_id(puzzle)?);
        }
        written += outcome.puzzles.len();
        failed += outcome.failed;
    }

    let stats = builder.stats();
    eprintln!(
        "Done: {written} written, {failed} failed ({:.1}% success, {:.3}s average)",
        stats.success_rate() * 100.0,
        stats.avg_generation_time().as_secs_f64()
    );
    Ok(())
}

fn validate_dictionary(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut problems: Vec<String> = dictionary::audit_path(&cli.dictionary)?
        .iter()
        .map(DictionaryError::display_detailed)
        .collect();
    if problems.is_empty() {
        let dictionary = Dictionary::load_from_path(&cli.dictionary)?;
        problems.extend(
            dictionary
                .categories_info()
                .into_iter()
                .filter(|info| !info.available)
                .map(|info| format!("category '{}': too few words ({} < {MIN_CATEGORY_SIZE})", info.name, info.word_count)),
        );
    }

    if problems.is_empty() {
        eprintln!("✓ Dictionary is valid");
        return Ok(());
    }
    for problem in problems.iter().take(10) {
        eprintln!("  - {problem}");
    }
    if problems.len() > 10 {
        eprintln!("  ... and {} more", problems.len() - 10);
    }
    Err(format!("dictionary has {} problems", problems.len()).into())
}
