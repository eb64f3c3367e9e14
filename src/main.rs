#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::path::{Path, PathBuf};

#[cfg(feature = "std")]
use anyhow::Context;
#[cfg(feature = "std")]
use battleships::{
    classify, classify_parallel, init_logging, layouts, propagate_steps, random_layout, search,
    search_parallel, Classification, Fleet, Puzzle, Ruleset, SearchMode, Status,
};
#[cfg(feature = "std")]
use battleships::config::{CLASSIFY_LIMIT, STANDARD_FLEET, STANDARD_SIZE};
#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Classify a puzzle file and print its solution.
    Solve {
        file: PathBuf,
        #[arg(long, help = "Split the search across threads")]
        parallel: bool,
    },
    /// Apply deduction only and print what it finds.
    Propagate {
        file: PathBuf,
        #[arg(long, help = "List every deduction by pass and rule")]
        steps: bool,
    },
    /// Count solutions of a puzzle file, up to a limit.
    Count {
        file: PathBuf,
        #[arg(long, default_value_t = CLASSIFY_LIMIT)]
        limit: usize,
        #[arg(long, help = "Split the search across threads")]
        parallel: bool,
    },
    /// Count every way to hide a fleet on an empty grid.
    Layouts {
        #[arg(long)]
        rows: usize,
        #[arg(long)]
        cols: usize,
        #[arg(long, value_delimiter = ',', help = "Ship lengths, e.g. --fleet 3,1,1")]
        fleet: Vec<usize>,
    },
    /// Hide a fleet at random and classify the resulting clue-free puzzle.
    Random {
        #[arg(long, default_value_t = STANDARD_SIZE)]
        rows: usize,
        #[arg(long, default_value_t = STANDARD_SIZE)]
        cols: usize,
        #[arg(long, value_delimiter = ',', help = "Ship lengths, e.g. --fleet 3,2,2,1")]
        fleet: Vec<usize>,
        #[arg(long, help = "Fix RNG seed for reproducible layouts (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn load(path: &Path) -> anyhow::Result<Puzzle> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    text.parse::<Puzzle>()
        .map_err(|e| anyhow::anyhow!(e))
        .with_context(|| format!("cannot parse {}", path.display()))
}

#[cfg(feature = "std")]
fn report(classification: &Classification, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(classification)?);
        return Ok(());
    }
    println!("{}", classification);
    for (i, solution) in classification.solutions().iter().enumerate() {
        if classification.solutions().len() > 1 {
            println!("solution {}:", i + 1);
        }
        print!("{}", solution.grid());
    }
    Ok(())
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { file, parallel } => {
            let puzzle = load(&file)?;
            let classification = if parallel {
                classify_parallel(&puzzle)
            } else {
                classify(&puzzle)
            };
            report(&classification, cli.json)?;
        }
        Commands::Propagate { file, steps } => {
            let puzzle = load(&file)?;
            let (grid, status, trace) = propagate_steps(puzzle.grid(), puzzle.ruleset().fleet());
            if cli.json {
                let result = if steps {
                    json!({ "status": status, "grid": grid, "steps": trace })
                } else {
                    json!({ "status": status, "grid": grid })
                };
                println!("{}", serde_json::to_string(&result)?);
            } else {
                if steps {
                    for step in &trace {
                        println!("{}", step);
                    }
                }
                match status {
                    Status::Contradiction(conflict) => println!("contradiction: {}", conflict),
                    _ => println!("{} cells left unknown", grid.unknown_count()),
                }
                print!("{}", grid);
            }
        }
        Commands::Count {
            file,
            limit,
            parallel,
        } => {
            let puzzle = load(&file)?;
            let (grid, fleet) = (puzzle.grid(), puzzle.ruleset().fleet());
            let mode = SearchMode::CountUpTo(limit);
            let found = if parallel {
                search_parallel(grid, fleet, mode)
            } else {
                search(grid, fleet, mode)
            };
            if cli.json {
                let result = json!({
                    "count": found.len(),
                    "exhausted": found.exhausted,
                    "stats": found.stats,
                });
                println!("{}", serde_json::to_string(&result)?);
            } else {
                let bound = if found.exhausted { "" } else { "at least " };
                println!("{}{} solutions", bound, found.len());
                println!(
                    "{} nodes, {} pruned, depth {}",
                    found.stats.nodes, found.stats.pruned, found.stats.max_depth
                );
            }
        }
        Commands::Layouts { rows, cols, fleet } => {
            let ruleset = Ruleset::new(rows, cols, Fleet::from_lengths(fleet))
                .map_err(|e| anyhow::anyhow!(e))?;
            let count = layouts(&ruleset).count();
            if cli.json {
                println!("{}", serde_json::to_string(&json!({ "layouts": count }))?);
            } else {
                println!("{} layouts", count);
            }
        }
        Commands::Random {
            rows,
            cols,
            fleet,
            seed,
        } => {
            let lengths = if fleet.is_empty() {
                STANDARD_FLEET.to_vec()
            } else {
                fleet
            };
            let ruleset = Ruleset::new(rows, cols, Fleet::from_lengths(lengths))
                .map_err(|e| anyhow::anyhow!(e))?;
            let mut rng = if let Some(s) = seed {
                SmallRng::seed_from_u64(s)
            } else {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            };
            let ships = random_layout(&mut rng, &ruleset).map_err(|e| anyhow::anyhow!(e))?;
            let puzzle = Puzzle::from_layout(ruleset, &ships).map_err(|e| anyhow::anyhow!(e))?;
            let classification = classify(&puzzle);
            if cli.json {
                let result = json!({
                    "puzzle": puzzle.to_string(),
                    "classification": classification,
                });
                println!("{}", serde_json::to_string(&result)?);
            } else {
                print!("{}", puzzle);
                println!();
                report(&classification, false)?;
            }
        }
    }
    Ok(())
}
