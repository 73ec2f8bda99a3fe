use predicates::str::contains;

#[test]
fn missing_processes_fail() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args(["--format", "summary"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: processes must not be empty"));
}

#[test]
fn zero_burst_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args(["--process", "P1:0:0"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: burst time must be > 0 for process 'P1' (got 0)"));
}

#[test]
fn negative_arrival_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args(["--process", "P1:-1:3"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: arrival time must be >= 0 for process 'P1' (got -1)"));
}

#[test]
fn duplicate_process_ids_fail() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args(["--process", "a:0:1", "--process", "a:2:2"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: duplicate process id 'a'"));
}

#[test]
fn malformed_entry_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args(["--processes", "a:0:1,b:one:2"]);
    cmd.assert().failure().stderr(contains(
        "Error: invalid process entry 'b:one:2': expected id:arrival:burst",
    ));
}

#[test]
fn zero_quantum_fails_when_round_robin_runs() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args(["--process", "a:0:1", "--quantum", "0"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: time quantum must be > 0 (got 0)"));
}

#[test]
fn zero_quantum_is_ignored_without_round_robin() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args(["--process", "a:0:1", "--quantum", "0", "--algo", "fcfs"]);
    cmd.assert().success();
}

#[test]
fn negative_context_switch_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args(["--process", "a:0:1", "--context-switch", "-1"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: context switch time must be >= 0 (got -1)"));
}
