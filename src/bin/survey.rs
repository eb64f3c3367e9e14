use battleships::config::STANDARD_FLEET;
use battleships::{classify, random_layout, Classification, Fleet, Puzzle, Ruleset};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 {
        eprintln!(
            "Usage: {} <rows> <cols> <first-seed> <count> [ship lengths...]",
            args[0]
        );
        std::process::exit(1);
    }
    let rows: usize = args[1].parse()?;
    let cols: usize = args[2].parse()?;
    let first: u64 = args[3].parse()?;
    let count: u64 = args[4].parse()?;
    let lengths = if args.len() > 5 {
        args[5..]
            .iter()
            .map(|a| a.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()?
    } else {
        STANDARD_FLEET.to_vec()
    };
    let ruleset =
        Ruleset::new(rows, cols, Fleet::from_lengths(lengths)).map_err(|e| anyhow::anyhow!(e))?;

    let mut tally = [0usize; 4];
    for seed in first..first.saturating_add(count) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let ships = random_layout(&mut rng, &ruleset).map_err(|e| anyhow::anyhow!(e))?;
        let puzzle =
            Puzzle::from_layout(ruleset.clone(), &ships).map_err(|e| anyhow::anyhow!(e))?;
        let slot = match classify(&puzzle) {
            Classification::SolvedByLogic(_) => 0,
            Classification::UniqueRequiresSearch(_) => 1,
            Classification::Ambiguous(_) => 2,
            Classification::Contradictory => 3,
        };
        tally[slot] += 1;
    }

    let result = json!({
        "puzzles": count,
        "solved_by_logic": tally[0],
        "unique_requires_search": tally[1],
        "ambiguous": tally[2],
        "contradictory": tally[3],
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
