use std::collections::HashMap;

use battleships::{
    classify, classify_parallel, layouts, random_layout, search, search_parallel, solved_grid,
    Fleet, Puzzle, Ruleset, SearchMode,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn random_puzzle(seed: u64, rows: usize, cols: usize, fleet: &[usize]) -> Puzzle {
    let ruleset = Ruleset::new(rows, cols, Fleet::from_lengths(fleet.iter().copied())).unwrap();
    let mut rng = SmallRng::seed_from_u64(seed);
    let ships = random_layout(&mut rng, &ruleset).unwrap();
    Puzzle::from_layout(ruleset, &ships).unwrap()
}

#[test]
fn search_counts_match_layout_enumeration() {
    let ruleset = Ruleset::new(4, 4, Fleet::from_lengths([2, 1, 1])).unwrap();
    let mut by_sums: HashMap<(Vec<usize>, Vec<usize>), usize> = HashMap::new();
    for layout in layouts(&ruleset) {
        let grid = solved_grid(&ruleset, &layout).unwrap();
        let sums = (grid.row_sums().to_vec(), grid.col_sums().to_vec());
        *by_sums.entry(sums).or_default() += 1;
    }
    assert!(!by_sums.is_empty());
    for ((rows, cols), expected) in by_sums {
        let puzzle = Puzzle::from_sums(ruleset.clone(), rows, cols).unwrap();
        let found = search(
            puzzle.grid(),
            ruleset.fleet(),
            SearchMode::CountUpTo(expected + 1),
        );
        assert!(found.exhausted);
        assert_eq!(found.len(), expected);
    }
}

#[test]
fn first_only_stops_at_one() {
    let p = random_puzzle(3, 5, 5, &[2, 1, 1]);
    let first = search(p.grid(), p.ruleset().fleet(), SearchMode::FirstOnly);
    assert_eq!(first.len(), 1);
    let more = search(p.grid(), p.ruleset().fleet(), SearchMode::CountUpTo(50));
    assert_eq!(more.first(), first.first());
    assert!(more.stats.nodes >= first.stats.nodes);
}

#[test]
fn zero_limit_finds_nothing() {
    let p = random_puzzle(1, 4, 4, &[2, 1]);
    let found = search(p.grid(), p.ruleset().fleet(), SearchMode::CountUpTo(0));
    assert!(found.is_empty());
    assert!(!found.exhausted);
    assert_eq!(found.stats.nodes, 0);
}

#[test]
fn exhausted_search_reports_exact_count() {
    // one single on a 1x3 strip with sums pinning it to the middle
    let ruleset = Ruleset::new(1, 3, Fleet::from_lengths([1])).unwrap();
    let p = Puzzle::from_sums(ruleset, vec![1], vec![0, 1, 0]).unwrap();
    let found = search(p.grid(), p.ruleset().fleet(), SearchMode::CountUpTo(5));
    assert_eq!(found.len(), 1);
    assert!(found.exhausted);
    assert_eq!(found.stats.pruned, 0);
}

#[test]
fn search_is_deterministic() {
    let p = random_puzzle(11, 6, 6, &[3, 2, 1, 1]);
    let a = search(p.grid(), p.ruleset().fleet(), SearchMode::CountUpTo(20));
    let b = search(p.grid(), p.ruleset().fleet(), SearchMode::CountUpTo(20));
    assert_eq!(a, b);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn parallel_search_matches_sequential(seed in any::<u64>(), limit in 1usize..6) {
        let p = random_puzzle(seed, 6, 6, &[3, 2, 2, 1]);
        let mode = SearchMode::CountUpTo(limit);
        let seq = search(p.grid(), p.ruleset().fleet(), mode);
        let par = search_parallel(p.grid(), p.ruleset().fleet(), mode);
        prop_assert_eq!(&seq.solutions, &par.solutions);
        prop_assert_eq!(seq.exhausted, par.exhausted);
    }

    #[test]
    fn planted_puzzles_are_never_contradictory(seed in any::<u64>()) {
        let p = random_puzzle(seed, 5, 5, &[3, 2, 1]);
        let seq = classify(&p);
        prop_assert!(!seq.solutions().is_empty());
        prop_assert_eq!(classify_parallel(&p), seq);
    }
}
