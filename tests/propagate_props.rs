use battleships::{
    propagate, random_layout, search, solved_grid, validate, Cell, Fleet, Grid, Ruleset,
    SearchMode, Status,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// A random 6x6 layout and a clue grid revealing a few of its cells.
fn planted(seed: u64) -> (Ruleset, Grid, Grid) {
    let ruleset = Ruleset::new(6, 6, Fleet::from_lengths([3, 2, 2, 1, 1])).unwrap();
    let mut rng = SmallRng::seed_from_u64(seed);
    let ships = random_layout(&mut rng, &ruleset).unwrap();
    let solution = solved_grid(&ruleset, &ships).unwrap();
    let mut clues = solution.blank();
    let reveals = rng.random_range(0..6);
    for _ in 0..reveals {
        let r = rng.random_range(0..6);
        let c = rng.random_range(0..6);
        clues.set(r, c, solution.get(r, c).unwrap()).unwrap();
    }
    (ruleset, solution, clues)
}

/// `later` keeps everything `earlier` knew, refining generic ship cells at most.
fn extends(earlier: Cell, later: Cell) -> bool {
    match (earlier, later) {
        (Cell::Unknown, _) => true,
        (Cell::Water, Cell::Water) => true,
        (Cell::Occupied(a), Cell::Occupied(b)) => a.admits(b),
        _ => false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn propagation_agrees_with_planted_solution(seed in any::<u64>()) {
        let (ruleset, solution, clues) = planted(seed);
        let (closure, status) = propagate(&clues, ruleset.fleet());
        prop_assert!(!status.is_contradiction());
        for ((r, c), cell) in closure.cells() {
            prop_assert!(extends(cell, solution.get(r, c).unwrap()), "cell ({}, {})", r, c);
        }
    }

    #[test]
    fn propagation_is_monotonic_and_idempotent(seed in any::<u64>()) {
        let (ruleset, _, clues) = planted(seed);
        let (once, _) = propagate(&clues, ruleset.fleet());
        for ((r, c), cell) in clues.cells() {
            prop_assert!(extends(cell, once.get(r, c).unwrap()));
        }
        let (twice, status) = propagate(&once, ruleset.fleet());
        prop_assert_eq!(status, Status::Fixpoint);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn search_results_validate_and_include_unique_solution(seed in any::<u64>()) {
        let (ruleset, solution, clues) = planted(seed);
        let found = search(&clues, ruleset.fleet(), SearchMode::CountUpTo(2));
        prop_assert!(!found.is_empty());
        for s in &found.solutions {
            prop_assert!(validate::check(s.grid(), ruleset.fleet()).is_ok());
        }
        if found.len() == 1 && found.exhausted {
            prop_assert_eq!(found.solutions[0].grid(), &solution);
        }
    }
}

#[test]
fn full_search_finds_the_planted_solution() {
    for seed in 0..8 {
        let (ruleset, solution, _) = planted(seed);
        // reveal the whole first row so the count stays small
        let mut clues = solution.blank();
        for c in 0..6 {
            clues.set(0, c, solution.get(0, c).unwrap()).unwrap();
        }
        let found = search(&clues, ruleset.fleet(), SearchMode::CountUpTo(10_000));
        assert!(found.exhausted);
        assert!(found.solutions.iter().any(|s| s.grid() == &solution));
    }
}
