use std::path::PathBuf;
use std::process::Command;

fn puzzle_file(name: &str, text: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("battleships-{}-{}.txt", name, std::process::id()));
    std::fs::write(&path, text).expect("cannot write puzzle file");
    path
}

const SMALL: &str = "\
rows 3
cols 4
fleet 3 1 1
row-sums 3 0 2
col-sums 2 1 2 0
";

#[test]
fn solve_prints_classification_json() {
    let path = puzzle_file("solve", SMALL);
    let output = Command::new(env!("CARGO_BIN_EXE_battleships"))
        .args(["solve", "--json"])
        .arg(&path)
        .output()
        .expect("failed to run battleships");
    assert!(output.status.success());
    let v: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid json");
    assert!(v.get("SolvedByLogic").is_some());
}

#[test]
fn count_reports_solutions() {
    let path = puzzle_file(
        "count",
        "rows 3\ncols 3\nfleet 1 1\nrow-sums 1 0 1\ncol-sums 1 0 1\n",
    );
    let output = Command::new(env!("CARGO_BIN_EXE_battleships"))
        .args(["count", "--json", "--limit", "5"])
        .arg(&path)
        .output()
        .expect("failed to run battleships");
    assert!(output.status.success());
    let v: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid json");
    assert_eq!(v["count"], 2);
    assert_eq!(v["exhausted"], true);
}

#[test]
fn random_is_reproducible_with_seed() {
    let run = || {
        Command::new(env!("CARGO_BIN_EXE_battleships"))
            .args(["random", "--json", "--rows", "6", "--cols", "6", "--fleet", "3,2,1", "--seed", "42"])
            .output()
            .expect("failed to run battleships")
    };
    let (a, b) = (run(), run());
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn unreadable_file_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_battleships"))
        .args(["solve", "/nonexistent/puzzle.txt"])
        .output()
        .expect("failed to run battleships");
    assert!(!output.status.success());
}

#[test]
fn propagate_lists_steps() {
    let path = puzzle_file("steps", "rows 1\ncols 4\nfleet 4\nrow-sums 4\ncol-sums 1 1 1 1\n");
    let output = Command::new(env!("CARGO_BIN_EXE_battleships"))
        .args(["propagate", "--json", "--steps"])
        .arg(&path)
        .output()
        .expect("failed to run battleships");
    assert!(output.status.success());
    let v: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid json");
    assert_eq!(v["status"], "Progressed");
    let steps = v["steps"].as_array().expect("steps array");
    assert_eq!(steps[0]["rule"], "LineSums");
    assert_eq!(steps[0]["cells"].as_array().map(Vec::len), Some(4));
}

#[test]
fn layouts_counts_every_placement() {
    let output = Command::new(env!("CARGO_BIN_EXE_battleships"))
        .args(["layouts", "--json", "--rows", "3", "--cols", "3", "--fleet", "3,1,1"])
        .output()
        .expect("failed to run battleships");
    assert!(output.status.success());
    let v: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid json");
    assert_eq!(v["layouts"], 4);
}
