use predicates::str::{contains, diff};
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

fn write_temp_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be available")
        .as_nanos();
    path.push(format!("sched-config-{}.{}", nanos, extension));
    fs::write(&path, contents).expect("config write should succeed");
    path
}

#[test]
fn config_file_toml_csv_runs() {
    let config = r#"
context_switch_time = 1
algorithms = ["fcfs"]
processes = [
  { id = "P1", arrival_time = 0, burst_time = 3 },
  { id = "P2", arrival_time = 0, burst_time = 3 }
]
"#;
    let path = write_temp_config(config, "toml");

    let expected = concat!(
        "algorithm,process_id,waiting_time,turnaround_time,response_time\n",
        "FCFS,P1,0,3,0\n",
        "FCFS,P2,4,7,4\n",
        "FCFS,average,2.00,5.00,2.00\n",
    );
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args(["run", "--config", path.to_str().unwrap(), "--format", "csv"]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn config_file_json_with_cli_overrides() {
    let config = r#"{
  "time_quantum": 5,
  "algorithms": ["fcfs", "rr"],
  "processes": [ { "id": "P1", "arrival_time": 0, "burst_time": 5 } ]
}"#;
    let path = write_temp_config(config, "json");

    let expected = concat!(
        "Parameters:\n",
        "time_quantum: 2\n",
        "context_switch_time: 0\n",
        "Summary:\n",
        "RR: avg waiting 3.00, avg turnaround 7.00, avg response 0.50\n",
    );
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args([
        "--config",
        path.to_str().unwrap(),
        "--process",
        "P2:1:3",
        "--quantum",
        "2",
        "--algo",
        "rr",
        "--format",
        "summary",
    ]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn unsupported_config_extension_fails() {
    let path = write_temp_config("processes = []", "yaml");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args(["--config", path.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: unsupported config format 'yaml'"));
}

#[test]
fn malformed_toml_is_reported() {
    let path = write_temp_config("processes = [ { id = ", "toml");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args(["--config", path.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: failed to parse TOML"));
}
