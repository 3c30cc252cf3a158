use std::fs;
use std::path::Path;
use std::process::Command;

/// Run the binary inside `dir` and capture (stdout, stderr, exit code)
fn run_in(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_detector-results"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run detector-results");

    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
        output.status.code().unwrap_or(-1),
    )
}

fn seed_layout(dir: &Path) {
    fs::create_dir_all(dir.join("generated")).unwrap();
    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(
        dir.join("generated").join("results-1-2.json"),
        r#"[{"website": "a.com"}, {"website": "b.com", "error": "timeout"}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("data").join("index.csv"),
        "website,rec_id\na.com,1\nb.com,2\n",
    )
    .unwrap();
}

#[test]
fn test_no_command_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_in(dir.path(), &[]);

    assert_eq!(code, 0);
    assert!(stdout.contains("extract-errors"));
    assert!(stdout.contains("enrich"));
    assert!(stdout.contains("merge"));
}

#[test]
fn test_default_paths_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    seed_layout(dir.path());

    let (stdout, stderr, code) = run_in(dir.path(), &["merge"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("Merged results written to generated/results.json"));

    let (stdout, stderr, code) = run_in(dir.path(), &["enrich"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("Updated JSON data written to generated/results_with_rec_id.json"));

    let (stdout, stderr, code) = run_in(dir.path(), &["extract-errors"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(stdout, "Websites with errors:\n[\"2\"]\n");

    let written =
        fs::read_to_string(dir.path().join("generated").join("websites_with_errors.json")).unwrap();
    assert_eq!(written, "[\n    \"2\"\n]");
}

#[test]
fn test_extract_errors_no_output_flag() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("in.json"),
        r#"[{"rec_id": "7", "error": null}, {"rec_id": "8"}]"#,
    )
    .unwrap();

    let (stdout, stderr, code) = run_in(
        dir.path(),
        &["extract-errors", "--input", "in.json", "--no-output"],
    );

    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(stdout, "Websites with errors:\n[\"7\"]\n");
    assert!(!dir.path().join("generated").exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_in(dir.path(), &["enrich"]);

    assert_ne!(code, 0);
    assert!(stderr.contains("does not exist"));
}

#[test]
fn test_missing_rec_id_fails_loudly() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.json"), r#"[{"website": "a.com", "error": "x"}]"#).unwrap();

    let (_, stderr, code) = run_in(dir.path(), &["extract-errors", "-i", "in.json"]);

    assert_ne!(code, 0);
    assert!(stderr.contains("rec_id"));
}

#[test]
fn test_list_printed_even_when_write_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.json"), r#"[{"rec_id": "4", "error": "x"}]"#).unwrap();
    // A directory in place of the output file makes the write fail
    fs::create_dir(dir.path().join("blocked.json")).unwrap();

    let (stdout, stderr, code) = run_in(
        dir.path(),
        &["extract-errors", "-i", "in.json", "-o", "blocked.json"],
    );

    assert_ne!(code, 0);
    assert_eq!(stdout, "Websites with errors:\n[\"4\"]\n");
    assert!(stderr.contains("blocked.json"));
}

#[test]
fn test_evaluate_default_paths() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("generated")).unwrap();
    fs::write(
        dir.path().join("generated").join("results.json"),
        r#"[{"label": "phishing", "staticContentScore": 0.8, "urlScore": 0.6},
            {"label": "legitimate", "staticContentScore": 0.2, "urlScore": 0.4}]"#,
    )
    .unwrap();

    let (stdout, stderr, code) = run_in(dir.path(), &["evaluate"]);

    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("StaticContentDetector - Best Threshold: 0.8, Best Accuracy: 1"));
    assert!(stdout.contains("UrlDetector - Best Threshold: 0.6, Best Accuracy: 1"));
    assert!(stdout.ends_with("ROC AUC results and curve data saved for both detectors.\n"));
    for name in [
        "content_roc_auc_results.json",
        "url_roc_auc_results.json",
        "content_roc_curve_data.json",
        "url_roc_curve_data.json",
    ] {
        assert!(dir.path().join("generated").join(name).exists(), "{}", name);
    }
}
