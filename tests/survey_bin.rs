use std::process::Command;

#[test]
fn survey_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_survey"))
        .args(["5", "5", "1", "4", "3", "2", "1"])
        .output()
        .expect("failed to run survey binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert_eq!(v["puzzles"], 4);
    // planted layouts always have at least one solution
    assert_eq!(v["contradictory"], 0);
    let total: u64 = ["solved_by_logic", "unique_requires_search", "ambiguous"]
        .iter()
        .map(|k| v[*k].as_u64().unwrap())
        .sum();
    assert_eq!(total, 4);
}

#[test]
fn survey_binary_rejects_missing_args() {
    let output = Command::new(env!("CARGO_BIN_EXE_survey"))
        .args(["5", "5"])
        .output()
        .expect("failed to run survey binary");
    assert!(!output.status.success());
}
