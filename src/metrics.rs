use std::collections::HashMap;

use crate::engine::SimulationRun;
use crate::error::{Error, Result};
use crate::models::AlgoConfig;
use crate::state::{Averages, MetricsRecord, Occupant, Process, ResultBundle, Timeline};

#[derive(Clone, Copy, Debug)]
struct Occupancy {
    first_start: u64,
    last_end: u64,
    total: u64,
}

/// Derives per-process metrics from a finished timeline.
///
/// Start and completion come from the first and last interval a process
/// occupies; nothing is read from the engine's runtime state. Records keep
/// the order of `processes`.
pub fn compute(
    algorithm: AlgoConfig,
    timeline: &Timeline,
    processes: &[Process],
) -> Result<Vec<MetricsRecord>> {
    if !timeline.is_contiguous() {
        return Err(Error::incomplete(algorithm, "timeline has gaps or overlaps"));
    }

    let mut occupancy: HashMap<&str, Occupancy> = HashMap::new();
    for interval in timeline.intervals() {
        let Occupant::Process(id) = &interval.occupant else {
            continue;
        };
        occupancy
            .entry(id.as_str())
            .and_modify(|entry| {
                entry.last_end = interval.end;
                entry.total += interval.duration();
            })
            .or_insert(Occupancy {
                first_start: interval.start,
                last_end: interval.end,
                total: interval.duration(),
            });
    }

    if let Some(unknown) = occupancy
        .keys()
        .find(|id| !processes.iter().any(|process| process.id == **id))
    {
        return Err(Error::incomplete(
            algorithm,
            format!("timeline references unknown process '{}'", unknown),
        ));
    }

    processes
        .iter()
        .map(|process| record_for(algorithm, process, occupancy.get(process.id.as_str())))
        .collect()
}

fn record_for(
    algorithm: AlgoConfig,
    process: &Process,
    occupancy: Option<&Occupancy>,
) -> Result<MetricsRecord> {
    let occupancy = occupancy.ok_or_else(|| {
        Error::incomplete(algorithm, format!("process '{}' never ran", process.id))
    })?;
    if occupancy.total != process.burst_time {
        return Err(Error::incomplete(
            algorithm,
            format!(
                "process '{}' ran {} of {} units",
                process.id, occupancy.total, process.burst_time
            ),
        ));
    }

    let negative = |what: &str| {
        Error::incomplete(
            algorithm,
            format!("negative {} for process '{}'", what, process.id),
        )
    };
    let response_time = occupancy
        .first_start
        .checked_sub(process.arrival_time)
        .ok_or_else(|| negative("response time"))?;
    let turnaround_time = occupancy
        .last_end
        .checked_sub(process.arrival_time)
        .ok_or_else(|| negative("turnaround time"))?;
    let waiting_time = turnaround_time
        .checked_sub(process.burst_time)
        .ok_or_else(|| negative("waiting time"))?;

    Ok(MetricsRecord {
        process_id: process.id.clone(),
        arrival_time: process.arrival_time,
        burst_time: process.burst_time,
        start_time: occupancy.first_start,
        completion_time: occupancy.last_end,
        waiting_time,
        turnaround_time,
        response_time,
    })
}

pub fn averages(records: &[MetricsRecord]) -> Averages {
    Averages {
        avg_waiting: mean(records.iter().map(|r| r.waiting_time)),
        avg_turnaround: mean(records.iter().map(|r| r.turnaround_time)),
        avg_response: mean(records.iter().map(|r| r.response_time)),
    }
}

/// Turns an engine run into a result bundle, cross-checking the engine's
/// own bookkeeping against what the timeline says.
pub fn build_bundle(run: SimulationRun, processes: &[Process]) -> Result<ResultBundle> {
    let records = compute(run.algorithm, &run.timeline, processes)?;

    for (process, state) in run.processes.iter().zip(&run.runtime) {
        let derived = records
            .iter()
            .find(|record| record.process_id == process.id)
            .map(|record| (record.start_time, record.completion_time));
        if derived != state.start_time.zip(state.completion_time) {
            return Err(Error::incomplete(
                run.algorithm,
                format!(
                    "runtime state of '{}' disagrees with the timeline",
                    process.id
                ),
            ));
        }
    }

    let duration = run.timeline.total_duration();
    let cpu_utilization_pct = if duration == 0 {
        0.0
    } else {
        round_to(run.timeline.busy_time() as f64 / duration as f64 * 100.0, 2)
    };

    Ok(ResultBundle {
        algorithm: run.algorithm,
        preemptive: run.preemptive,
        context_switches: run.timeline.switch_count(),
        cpu_utilization_pct,
        averages: averages(&records),
        per_process_metrics: records,
        timeline: run.timeline,
    })
}

fn mean(values: impl Iterator<Item = u64>) -> f64 {
    let (sum, count) = values.fold((0u128, 0u64), |(sum, count), value| {
        (sum + value as u128, count + 1)
    });
    if count == 0 {
        return 0.0;
    }
    round_to(sum as f64 / count as f64, 2)
}

fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return value.round();
    }
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
