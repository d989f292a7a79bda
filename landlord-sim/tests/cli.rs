use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "landlord-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn run_json(label: &str, extra: &[&str]) -> String {
    let exe = env!("CARGO_BIN_EXE_landlord-sim");
    let output_path = temp_path(label);
    let status = Command::new(exe)
        .args(["--report", "json", "--output"])
        .arg(&output_path)
        .args(extra)
        .status()
        .expect("run cli");
    assert!(status.success());
    std::fs::read_to_string(output_path).expect("read output")
}

#[test]
fn cli_writes_json_report() {
    let content = run_json("json", &["--matches", "20", "--seeds", "3,4"]);
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let reports = value.as_array().expect("array of batches");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["stats"]["matches"], 20);
    assert_eq!(reports[1]["stats"]["batch_seed"], 4);
    assert_eq!(
        reports[0]["stats"]["tallies"].as_array().map(Vec::len),
        Some(4)
    );
}

#[test]
fn cli_runs_are_reproducible() {
    let first = run_json("repro-a", &["--matches", "30", "--seeds", "1337"]);
    let second = run_json("repro-b", &["--matches", "30", "--seeds", "1337", "--parallel"]);
    assert_eq!(first, second);
}

#[test]
fn cli_default_console_run_succeeds() {
    let exe = env!("CARGO_BIN_EXE_landlord-sim");
    let output = Command::new(exe)
        .args(["--matches", "10"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Landlord Strategy Simulator"));
    assert!(stdout.contains("1337 (10 matches)"));
    assert!(stdout.contains("Most wins"));
}

#[test]
fn cli_markdown_uses_reference_labels() {
    let exe = env!("CARGO_BIN_EXE_landlord-sim");
    let output_path = temp_path("markdown");
    let status = Command::new(exe)
        .args(["--matches", "10", "--report", "markdown", "--labels", "reference", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("# Landlord Simulation Results"));
    assert!(content.contains("Aleatório"));
    assert!(content.contains("Cauteloso"));
}

#[test]
fn cli_rejects_bad_seed_token() {
    let exe = env!("CARGO_BIN_EXE_landlord-sim");
    let output = Command::new(exe)
        .args(["--matches", "1", "--seeds", "abc"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unrecognized seed token"));
}

#[test]
fn cli_rejects_invalid_config_file() {
    let exe = env!("CARGO_BIN_EXE_landlord-sim");
    let config_path = temp_path("config.json");
    std::fs::write(&config_path, r#"{ "sale_cost": { "min": 300, "max": 10 } }"#)
        .expect("write config");
    let output = Command::new(exe)
        .args(["--matches", "1", "--config"])
        .arg(&config_path)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid match configuration"));
}

#[test]
fn cli_honors_round_cap_override() {
    let config_path = temp_path("short-cap.json");
    std::fs::write(&config_path, r#"{ "round_cap": 1 }"#).expect("write config");
    let content = run_json(
        "short-cap",
        &["--matches", "5", "--config", config_path.to_str().expect("utf8 path")],
    );
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(value[0]["stats"]["timeouts"], 5);
}
