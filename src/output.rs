use std::fmt::Write;

use crate::error::{Error, Result};
use crate::models::{AlgoConfig, SimConfig};
use crate::state::{ComparisonResult, ResultBundle, Timeline};

pub trait Formatter {
    fn write(&self, result: &ComparisonResult) -> Result<String>;
}

pub struct HumanFormatter;
pub struct SummaryFormatter;
pub struct JsonFormatter;
pub struct CsvFormatter;

impl Formatter for HumanFormatter {
    fn write(&self, result: &ComparisonResult) -> Result<String> {
        let mut out = String::new();
        write_parameters(&mut out, result);
        for bundle in &result.results {
            let _ = writeln!(
                out,
                "== {} ({}) ==",
                bundle.algorithm,
                if bundle.preemptive {
                    "preemptive"
                } else {
                    "non-preemptive"
                }
            );
            let _ = writeln!(out, "Timeline: {}", render_timeline(&bundle.timeline));
            write_process_table(&mut out, bundle);
            let _ = writeln!(
                out,
                "Averages: waiting {:.2}, turnaround {:.2}, response {:.2}",
                bundle.averages.avg_waiting,
                bundle.averages.avg_turnaround,
                bundle.averages.avg_response
            );
            let _ = writeln!(
                out,
                "CPU utilization: {:.2}% ({} context switches)",
                bundle.cpu_utilization_pct, bundle.context_switches
            );
        }
        write_summary(&mut out, result);
        Ok(out)
    }
}

impl Formatter for SummaryFormatter {
    fn write(&self, result: &ComparisonResult) -> Result<String> {
        let mut out = String::new();
        write_parameters(&mut out, result);
        write_summary(&mut out, result);
        Ok(out)
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, result: &ComparisonResult) -> Result<String> {
        let mut json = serde_json::to_string_pretty(result)
            .map_err(|err| Error::Serialize(format!("failed to encode JSON: {}", err)))?;
        json.push('\n');
        Ok(json)
    }
}

/// One row per process per algorithm, then an `average` row per algorithm.
/// Averages are printed with exactly two decimals; the JSON output carries
/// the same values as plain numbers, so `2.00` here is `2.0` there.
impl Formatter for CsvFormatter {
    fn write(&self, result: &ComparisonResult) -> Result<String> {
        let mut out = String::from("algorithm,process_id,waiting_time,turnaround_time,response_time\n");
        for bundle in &result.results {
            for record in &bundle.per_process_metrics {
                let _ = writeln!(
                    out,
                    "{},{},{},{},{}",
                    bundle.algorithm,
                    csv_field(&record.process_id),
                    record.waiting_time,
                    record.turnaround_time,
                    record.response_time
                );
            }
            let _ = writeln!(
                out,
                "{},average,{:.2},{:.2},{:.2}",
                bundle.algorithm,
                bundle.averages.avg_waiting,
                bundle.averages.avg_turnaround,
                bundle.averages.avg_response
            );
        }
        Ok(out)
    }
}

/// `P1 [0-5) | SWITCH [5-6) | P2 [6-9)`
pub fn render_timeline(timeline: &Timeline) -> String {
    timeline
        .intervals()
        .iter()
        .map(|interval| {
            format!(
                "{} [{}-{})",
                interval.occupant.label(),
                interval.start,
                interval.end
            )
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn render_config(config: &SimConfig) -> String {
    let mut out = String::new();
    let algorithms = config
        .algorithms
        .iter()
        .map(AlgoConfig::key)
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "Algorithms: {}", algorithms);
    let _ = writeln!(out, "Time quantum: {}", config.time_quantum);
    let _ = writeln!(out, "Context switch: {}", config.context_switch_time);
    let _ = writeln!(out, "Parallel: {}", config.parallel);
    let _ = writeln!(out, "Processes:");
    for process in &config.processes {
        let _ = writeln!(
            out,
            "- {} (arrival: {}, burst: {})",
            process.id, process.arrival_time, process.burst_time
        );
    }
    out
}

pub fn render_algorithms() -> String {
    AlgoConfig::ALL
        .iter()
        .map(|algo| format!("{}\n", algo.key()))
        .collect()
}

fn write_parameters(out: &mut String, result: &ComparisonResult) {
    let _ = writeln!(out, "Parameters:");
    let _ = writeln!(out, "time_quantum: {}", result.parameters.time_quantum);
    let _ = writeln!(
        out,
        "context_switch_time: {}",
        result.parameters.context_switch_time
    );
}

fn write_process_table(out: &mut String, bundle: &ResultBundle) {
    let width = bundle
        .per_process_metrics
        .iter()
        .map(|record| record.process_id.len())
        .max()
        .unwrap_or(0)
        .max("Process".len());
    let _ = writeln!(
        out,
        "{:<width$}  {:>7}  {:>5}  {:>5}  {:>10}  {:>7}  {:>10}  {:>8}",
        "Process", "Arrival", "Burst", "Start", "Completion", "Waiting", "Turnaround", "Response",
    );
    for record in &bundle.per_process_metrics {
        let _ = writeln!(
            out,
            "{:<width$}  {:>7}  {:>5}  {:>5}  {:>10}  {:>7}  {:>10}  {:>8}",
            record.process_id,
            record.arrival_time,
            record.burst_time,
            record.start_time,
            record.completion_time,
            record.waiting_time,
            record.turnaround_time,
            record.response_time,
        );
    }
}

fn write_summary(out: &mut String, result: &ComparisonResult) {
    let _ = writeln!(out, "Summary:");
    for bundle in &result.results {
        let _ = writeln!(
            out,
            "{}: avg waiting {:.2}, avg turnaround {:.2}, avg response {:.2}",
            bundle.algorithm,
            bundle.averages.avg_waiting,
            bundle.averages.avg_turnaround,
            bundle.averages.avg_response
        );
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
