use std::process::Command;

use serde_json::Value;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_wave_cli"))
}

fn stdout_json(output: &std::process::Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).expect("stdout utf8");
    serde_json::from_str(&stdout).unwrap_or_else(|err| panic!("invalid JSON ({err}): {stdout}"))
}

#[test]
fn stats_replays_sample_file() {
    let input = std::env::temp_dir().join(format!("wave-cli-stats-{}.json", std::process::id()));
    std::fs::write(&input, "[1.0, -1.0, 1.0, -1.0]").expect("write samples");

    let output = cli()
        .args(["stats", "--input", input.to_str().unwrap(), "--rate", "2", "--window", "10"])
        .output()
        .expect("stats command");
    let _ = std::fs::remove_file(&input);

    assert!(
        output.status.success(),
        "stats exited with {:?}",
        output.status.code()
    );
    let json = stdout_json(&output);
    let stats = &json["statistics"];
    assert_eq!(stats["sample_count"], 4);
    assert_eq!(stats["zero_crossings"], 3);
    assert_eq!(stats["max"], 1.0);
    assert_eq!(stats["min"], -1.0);
}

#[test]
fn stats_missing_file_fails() {
    let output = cli()
        .args(["stats", "--input", "/nonexistent/wave-samples.json"])
        .output()
        .expect("stats command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr utf8");
    assert!(stderr.contains("reading"), "unexpected stderr: {stderr}");
}

#[test]
fn fit_prints_calibration() {
    let output = cli()
        .args(["fit", "--targets=-10,0,10", "--measured=-19,1,21"])
        .output()
        .expect("fit command");

    assert!(
        output.status.success(),
        "fit exited with {:?}",
        output.status.code()
    );
    let json = stdout_json(&output);
    assert_eq!(json["status"], "Completed");
    assert_eq!(json["points"].as_array().map(Vec::len), Some(3));

    let slope = json["fit"]["slope"].as_f64().expect("slope");
    let offset = json["fit"]["offset"].as_f64().expect("offset");
    assert!((slope - 2.0).abs() < 1e-9);
    assert!((offset - 1.0).abs() < 1e-9);
}

#[test]
fn fit_rejects_mismatched_lengths() {
    let output = cli()
        .args(["fit", "--targets", "0,10", "--measured", "1"])
        .output()
        .expect("fit command");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn simulate_runs_to_completion() {
    let output = cli()
        .args(["simulate", "--duration", "20", "--rate", "5", "--seed", "7"])
        .output()
        .expect("simulate command");

    assert!(
        output.status.success(),
        "simulate exited with {:?}",
        output.status.code()
    );
    let json = stdout_json(&output);
    assert_eq!(json["session"]["status"], "Stopped");
    assert_eq!(json["session"]["stop_reason"], "Completed");

    let stats = &json["channels"][0]["statistics"];
    assert!(stats["sample_count"].as_u64().unwrap() > 0);
    assert!(stats["significant_height"].as_f64().unwrap() > 0.0);
}

#[test]
fn simulate_is_deterministic_for_a_seed() {
    let run = || {
        cli()
            .args(["simulate", "--duration", "10", "--rate", "4", "--seed", "11"])
            .output()
            .expect("simulate command")
            .stdout
    };
    assert_eq!(run(), run());
}
