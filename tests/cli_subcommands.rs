use predicates::str::{contains, diff};

#[test]
fn list_algorithms_prints_supported_values() {
    let expected = concat!("fcfs\n", "spn\n", "hrrn\n", "rr\n", "srtf\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.arg("list-algorithms");
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn show_config_prints_parsed_configuration() {
    let expected = concat!(
        "Algorithms: spn, rr\n",
        "Time quantum: 4\n",
        "Context switch: 1\n",
        "Parallel: false\n",
        "Processes:\n",
        "- P1 (arrival: 0, burst: 5)\n",
        "- P2 (arrival: 3, burst: 2)\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args([
        "show-config",
        "--processes",
        "P1:0:5,P2:3:2",
        "--quantum",
        "4",
        "--context-switch",
        "1",
        "--algo",
        "spn",
        "--algo",
        "rr",
    ]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn generate_is_reproducible_with_seed() {
    let run = || {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
        cmd.args(["generate", "--count", "3", "--seed", "11"]);
        let output = cmd.output().expect("generate should run");
        assert!(output.status.success());
        String::from_utf8(output.stdout).expect("utf-8 output")
    };

    let first = run();
    assert_eq!(first, run());
    assert!(first.contains("time_quantum = 2"));
    assert!(first.contains("[[processes]]"));
    assert!(first.contains("id = \"P3\""));
    assert!(!first.contains("id = \"P4\""));
}

#[test]
fn generate_output_contains_process_table() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args(["generate", "--seed", "1"]);
    cmd.assert()
        .success()
        .stdout(contains("[[processes]]"))
        .stdout(contains("burst_time = "));
}
