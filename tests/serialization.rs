use battleships::{classify, random_layout, solved_grid, Fleet, Grid, Puzzle, Ruleset, Ship};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn solved_grid_bincode_roundtrip(seed in any::<u64>()) {
        let ruleset = Ruleset::standard();
        let mut rng = SmallRng::seed_from_u64(seed);
        let ships = random_layout(&mut rng, &ruleset).unwrap();
        let grid = solved_grid(&ruleset, &ships).unwrap();
        let bytes = bincode::serialize(&grid).unwrap();
        let decoded: Grid = bincode::deserialize(&bytes).unwrap();
        prop_assert_eq!(&decoded, &grid);

        let ship_bytes = bincode::serialize(&ships).unwrap();
        let decoded_ships: Vec<Ship> = bincode::deserialize(&ship_bytes).unwrap();
        prop_assert_eq!(decoded_ships, ships);
    }
}

#[test]
fn puzzle_text_roundtrip() {
    let ruleset = Ruleset::new(5, 5, Fleet::from_lengths([3, 2, 1])).unwrap();
    let mut rng = SmallRng::seed_from_u64(99);
    let ships = random_layout(&mut rng, &ruleset).unwrap();
    let solution = solved_grid(&ruleset, &ships).unwrap();
    let (r, c) = ships[0].origin();
    let puzzle = Puzzle::from_layout(ruleset, &ships)
        .unwrap()
        .with_clue(r, c, solution.get(r, c).unwrap())
        .unwrap();
    let text = puzzle.to_string();
    assert!(text.contains("grid"));
    let parsed: Puzzle = text.parse().unwrap();
    assert_eq!(parsed, puzzle);
}

#[test]
fn classification_serialises_to_json() {
    let ruleset = Ruleset::new(1, 4, Fleet::from_lengths([4])).unwrap();
    let puzzle = Puzzle::from_sums(ruleset, vec![4], vec![1, 1, 1, 1]).unwrap();
    let value = serde_json::to_value(classify(&puzzle)).unwrap();
    assert!(value.get("SolvedByLogic").is_some());
}

#[test]
fn mis_sized_grid_json_is_rejected() {
    let ruleset = Ruleset::new(2, 2, Fleet::from_lengths([1])).unwrap();
    let puzzle = Puzzle::from_sums(ruleset, vec![1, 0], vec![1, 0]).unwrap();
    let mut value = serde_json::to_value(puzzle.grid()).unwrap();
    value["cells"] = serde_json::json!(["Unknown"]);
    let decoded = serde_json::from_value::<Grid>(value);
    assert!(decoded.is_err());

    let mut value = serde_json::to_value(puzzle.grid()).unwrap();
    value["row_sums"] = serde_json::json!([5, 0]);
    assert!(serde_json::from_value::<Grid>(value).is_err());

    let value = serde_json::to_value(puzzle.grid()).unwrap();
    let decoded: Grid = serde_json::from_value(value).unwrap();
    assert_eq!(&decoded, puzzle.grid());
}

#[test]
fn invalid_puzzle_json_is_rejected() {
    let ruleset = Ruleset::new(3, 4, Fleet::from_lengths([3, 1, 1])).unwrap();
    let puzzle = Puzzle::from_sums(ruleset, vec![3, 0, 2], vec![2, 1, 2, 0]).unwrap();
    let valid = serde_json::to_value(&puzzle).unwrap();
    let decoded: Puzzle = serde_json::from_value(valid.clone()).unwrap();
    assert_eq!(decoded, puzzle);

    // ship longer than any line
    let mut long_ship = valid.clone();
    long_ship["ruleset"]["fleet"]["ships"] = serde_json::json!({ "9": 1 });
    assert!(serde_json::from_value::<Puzzle>(long_ship).is_err());

    // sums no longer add up to the fleet
    let mut mismatch = valid.clone();
    mismatch["grid"]["row_sums"] = serde_json::json!([3, 1, 2]);
    assert!(serde_json::from_value::<Puzzle>(mismatch).is_err());

    // grid of the wrong size for the ruleset
    let mut resized = valid;
    resized["ruleset"]["cols"] = serde_json::json!(5);
    assert!(serde_json::from_value::<Puzzle>(resized).is_err());
}

#[test]
fn zero_counts_are_dropped_from_decoded_fleets() {
    let fleet: Fleet = serde_json::from_str(r#"{"ships":{"2":1,"5":0}}"#).unwrap();
    assert_eq!(fleet, Fleet::from_lengths([2]));
    assert_eq!(fleet.longest(), Some(2));
}
