//! Integration tests for the setlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Creating and editing routines
//! - Guided sessions driven from stdin
//! - Event log and CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("setlog"))
}

fn run(data_dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    cli().args(args).arg("--data-dir").arg(data_dir).assert()
}

fn add(data_dir: &Path, routine: &str, exercise: &str, equipment: &str, sets: u32, reps: u32) {
    run(
        data_dir,
        &[
            "add",
            routine,
            exercise,
            "--equipment",
            equipment,
            "--sets",
            &sets.to_string(),
            "--reps",
            &reps.to_string(),
        ],
    )
    .success();
}

/// Routine A: 14 goal sets, three barbell lifts then curls
fn create_routine_a(data_dir: &Path) {
    run(data_dir, &["new", "Test Routine A"]).success();
    add(data_dir, "Test Routine A", "Bent Over Barbell Row", "barbell", 3, 5);
    add(data_dir, "Test Routine A", "Barbell Bench Press", "barbell", 3, 5);
    add(data_dir, "Test Routine A", "Barbell Squat", "barbell", 3, 5);
    add(data_dir, "Test Routine A", "Bicep Curl", "dumbbell", 5, 10);
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Workout routine tracker with guided sessions",
        ));
}

#[test]
fn test_new_creates_routine_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    run(data_dir, &["new", "Push Day"])
        .success()
        .stdout(predicate::str::contains("Created routine Push Day"));

    let path = data_dir.join("routines/Push_Day.json");
    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc, serde_json::json!({ "name": "Push Day", "exercises": [] }));
}

#[test]
fn test_new_refuses_existing_routine() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    run(data_dir, &["new", "Push Day"]).success();
    run(data_dir, &["new", "Push Day"])
        .failure()
        .stderr(predicate::str::contains("RoutineExists"));
}

#[test]
fn test_add_and_show() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    create_routine_a(data_dir);

    run(data_dir, &["show", "Test Routine A"]).success().stdout(
        predicate::str::contains(
            "|   | 1 | Bent Over Barbell Row   | 3  | 5  | 0   | 0 |\n\
             |   | 2 | Barbell Bench Press     | 3  | 5  | 0   | 0 |\n\
             |   | 3 | Barbell Squat           | 3  | 5  | 0   | 0 |\n\
             |   | 4 | Bicep Curl              | 5  | 10 | 0   | 0 |",
        )
        .and(predicate::str::contains("Met Goal: No")),
    );
}

#[test]
fn test_show_by_path() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    create_routine_a(data_dir);

    let path = data_dir.join("routines/Test_Routine_A.json");
    run(data_dir, &["show", path.to_str().unwrap()])
        .success()
        .stdout(predicate::str::starts_with("Test Routine A\n"));
}

#[test]
fn test_add_rejects_unknown_equipment() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    run(data_dir, &["new", "Legs"]).success();

    run(
        data_dir,
        &["add", "Legs", "Swing", "--equipment", "kettlebell", "--sets", "3", "--reps", "5"],
    )
    .failure()
    .stderr(predicate::str::contains("Unknown equipment"));
}

#[test]
fn test_remove_exercise() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    create_routine_a(data_dir);

    run(data_dir, &["remove", "Test Routine A", "Barbell Squat"])
        .success()
        .stdout(predicate::str::contains("Barbell Squat removed"));

    run(data_dir, &["show", "Test Routine A"])
        .success()
        .stdout(predicate::str::contains("Barbell Squat").not())
        .stdout(predicate::str::contains("| 3 | Bicep Curl"));

    run(data_dir, &["remove", "Test Routine A", "Leg Press"])
        .failure()
        .stderr(predicate::str::contains("ExerciseNotFound"));
}

#[test]
fn test_edit_exercise() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    create_routine_a(data_dir);

    run(
        data_dir,
        &[
            "edit",
            "Test Routine A",
            "Barbell Bench Press",
            "--name",
            "Incline Bench Press",
            "--equipment",
            "d",
            "--reps",
            "8",
        ],
    )
    .success()
    .stdout(predicate::str::contains("Updated Incline Bench Press"));

    run(data_dir, &["show", "Test Routine A"])
        .success()
        .stdout(predicate::str::contains(
            "|   | 2 | Incline Bench Press     | 3  | 8  | 0   | 0 |",
        ))
        .stdout(predicate::str::contains("Barbell Bench Press").not());

    let path = data_dir.join("routines/Test_Routine_A.json");
    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["exercises"][1]["equipment"], "Dumbbell");
}

#[test]
fn test_edit_rejects_unknown_exercise_and_empty_edit() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    create_routine_a(data_dir);

    run(data_dir, &["edit", "Test Routine A", "Leg Press", "--sets", "4"])
        .failure()
        .stderr(predicate::str::contains("ExerciseNotFound"));

    // At least one change is required
    run(data_dir, &["edit", "Test Routine A", "Barbell Squat"]).failure();

    run(data_dir, &["show", "Test Routine A"])
        .success()
        .stdout(predicate::str::contains(
            "|   | 3 | Barbell Squat           | 3  | 5  | 0   | 0 |",
        ));
}

#[test]
fn test_new_succeeds_when_event_log_unwritable() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    // A directory where the event log should be makes every append fail
    fs::create_dir_all(data_dir.join("events.jsonl")).unwrap();

    run(data_dir, &["new", "Push Day"])
        .success()
        .stdout(predicate::str::contains("Created routine Push Day"));
    assert!(data_dir.join("routines/Push_Day.json").exists());
}

#[test]
fn test_rename_moves_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    create_routine_a(data_dir);

    run(data_dir, &["rename", "Test Routine A", "Upper Body"]).success();

    assert!(!data_dir.join("routines/Test_Routine_A.json").exists());
    run(data_dir, &["show", "Upper Body"])
        .success()
        .stdout(predicate::str::starts_with("Upper Body\n"))
        .stdout(predicate::str::contains("Bicep Curl"));
}

#[test]
fn test_list_routines() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    run(data_dir, &["list"])
        .success()
        .stdout(predicate::str::contains("No saved routines"));

    create_routine_a(data_dir);
    run(data_dir, &["new", "Leg Day"]).success();

    run(data_dir, &["list"])
        .success()
        .stdout(predicate::str::contains("Leg Day (0 exercises)"))
        .stdout(predicate::str::contains("Test Routine A (4 exercises)"));
}

#[test]
fn test_session_partial_workout() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    create_routine_a(data_dir);

    // Plates per side 25 -> 95 lb on the bar
    cli()
        .args(["session", "Test Routine A", "--data-dir"])
        .arg(data_dir)
        .write_stdin("w 25\na\na\nb\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "| * | 1 | Bent Over Barbell Row   | 3  | 5  | 95  | 2 |",
        ))
        .stdout(predicate::str::contains("Rest up and better luck next time!"))
        .stdout(predicate::str::contains("Workout complete!").not());
}

#[test]
fn test_session_complete_workout() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    create_routine_a(data_dir);

    let mut input = String::from("w 25\n");
    input.push_str(&"a\n".repeat(9));
    input.push_str("w\n15\n");
    input.push_str(&"a\n".repeat(5));

    cli()
        .args(["session", "Test Routine A", "--data-dir"])
        .arg(data_dir)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "|   | 4 | Bicep Curl              | 5  | 10 | 15  | 5 |",
        ))
        .stdout(predicate::str::contains("Workout complete!"))
        .stdout(predicate::str::contains("Met Goal: Yes"))
        .stdout(predicate::str::contains("You met all your goals!"));
}

#[test]
fn test_session_skip_and_invalid_input() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    create_routine_a(data_dir);

    cli()
        .args(["session", "Test Routine A", "--data-dir"])
        .arg(data_dir)
        .write_stdin("x\nw heavy\ns\ns\ns\ns\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not a valid selection"))
        .stdout(predicate::str::contains("Not a valid weight"))
        .stdout(predicate::str::contains("Workout complete!"))
        .stdout(predicate::str::contains("Rest up and better luck next time!"));
}

#[test]
fn test_session_does_not_persist_progress() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    create_routine_a(data_dir);

    cli()
        .args(["session", "Test Routine A", "--data-dir"])
        .arg(data_dir)
        .write_stdin("w 25\na\na\na\n")
        .assert()
        .success();

    run(data_dir, &["show", "Test Routine A"])
        .success()
        .stdout(predicate::str::contains(
            "|   | 1 | Bent Over Barbell Row   | 3  | 5  | 0   | 0 |",
        ));
}

#[test]
fn test_session_empty_routine_fails() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    run(data_dir, &["new", "Empty Routine"]).success();

    cli()
        .args(["session", "Empty Routine", "--data-dir"])
        .arg(data_dir)
        .write_stdin("a\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("EmptyRoutine"));
}

#[test]
fn test_session_export_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    create_routine_a(data_dir);
    let csv_path = data_dir.join("export.csv");

    cli()
        .args(["session", "Test Routine A", "--data-dir"])
        .arg(data_dir)
        .arg("--export")
        .arg(&csv_path)
        .write_stdin("w 25\na\na\na\nb\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 4 exercises"));

    let csv_content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    let lines: Vec<_> = csv_content.lines().collect();
    assert_eq!(lines[0], "name,equipment,sets,reps,weight,sets_completed,met_goal");
    assert_eq!(lines[1], "Bent Over Barbell Row,Barbell,3,5,95,3,true");
    assert_eq!(lines[2], "Barbell Bench Press,Barbell,3,5,0,0,false");
}

#[test]
fn test_event_log_records_mutations() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    run(data_dir, &["log"])
        .success()
        .stdout(predicate::str::contains("No events logged"));

    run(data_dir, &["new", "Pull Day"]).success();
    add(data_dir, "Pull Day", "Deadlift", "b", 2, 5);
    run(data_dir, &["edit", "Pull Day", "Deadlift", "--sets", "1"]).success();
    cli()
        .args(["session", "Pull Day", "--data-dir"])
        .arg(data_dir)
        .write_stdin("w 45\na\n")
        .assert()
        .success();

    run(data_dir, &["log"])
        .success()
        .stdout(predicate::str::contains("Created routine Pull Day"))
        .stdout(predicate::str::contains("Added Deadlift (2 x 5, Barbell) to Pull Day"))
        .stdout(predicate::str::contains("Edited Deadlift in Pull Day: sets 1"))
        .stdout(predicate::str::contains("Began session for Pull Day"))
        .stdout(predicate::str::contains("Set weight of Deadlift to 135 lb"))
        .stdout(predicate::str::contains("Ended session for Pull Day"));
}
