use serde::Serialize;
use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::models::AlgoConfig;

/// A validated process. Immutable once a simulation starts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Process {
    pub id: String,
    pub arrival_time: u64,
    pub burst_time: u64,
}

impl Process {
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::EmptyProcessId);
        }
        if arrival_time < 0 {
            return Err(Error::NegativeArrivalTime {
                id,
                arrival: arrival_time,
            });
        }
        if burst_time <= 0 {
            return Err(Error::InvalidBurstTime {
                id,
                burst: burst_time,
            });
        }
        Ok(Self {
            id,
            arrival_time: arrival_time as u64,
            burst_time: burst_time as u64,
        })
    }

    /// Default scheduling order: earlier arrival first, then smaller id.
    pub fn tie_break_cmp(&self, other: &Self) -> Ordering {
        self.arrival_time
            .cmp(&other.arrival_time)
            .then_with(|| compare_ids(&self.id, &other.id))
    }
}

/// Ids that are both integers compare numerically, anything else
/// lexicographically.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(left), Ok(right)) => left.cmp(&right).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct SimParams {
    pub time_quantum: u64,
    pub context_switch_time: u64,
}

/// Per-run mutable bookkeeping for one process.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProcessRuntimeState {
    pub remaining_time: u64,
    pub start_time: Option<u64>,
    pub completion_time: Option<u64>,
}

impl ProcessRuntimeState {
    pub fn new(process: &Process) -> Self {
        Self {
            remaining_time: process.burst_time,
            start_time: None,
            completion_time: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Records the first dispatch; later dispatches leave it untouched.
    pub fn dispatch(&mut self, clock: u64) {
        if self.start_time.is_none() {
            self.start_time = Some(clock);
        }
    }

    /// Runs the process for `units` ending at `end`. Returns true when this
    /// slice finished it.
    pub fn execute(&mut self, units: u64, end: u64) -> bool {
        self.remaining_time = self.remaining_time.saturating_sub(units);
        if self.remaining_time == 0 && self.completion_time.is_none() {
            self.completion_time = Some(end);
            return true;
        }
        false
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Occupant {
    Process(String),
    Idle,
    Switch,
}

impl Occupant {
    pub fn process_id(&self) -> Option<&str> {
        match self {
            Occupant::Process(id) => Some(id),
            Occupant::Idle | Occupant::Switch => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Occupant::Process(id) => id,
            Occupant::Idle => "IDLE",
            Occupant::Switch => "SWITCH",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ExecutionInterval {
    pub occupant: Occupant,
    pub start: u64,
    pub end: u64,
}

impl ExecutionInterval {
    pub fn duration(&self) -> u64 {
        self.end - self.start
    }
}

/// Ordered, contiguous execution intervals of one algorithm run.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    intervals: Vec<ExecutionInterval>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interval. Empty intervals are dropped and an interval that
    /// continues the previous occupant extends it instead. Back-to-back
    /// switches stay separate so each one is counted.
    pub fn push(&mut self, occupant: Occupant, start: u64, end: u64) {
        if end <= start {
            return;
        }
        if let Some(last) = self.intervals.last_mut() {
            if last.occupant == occupant && last.end == start && occupant != Occupant::Switch {
                last.end = end;
                return;
            }
        }
        self.intervals.push(ExecutionInterval {
            occupant,
            start,
            end,
        });
    }

    pub fn intervals(&self) -> &[ExecutionInterval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn start(&self) -> Option<u64> {
        self.intervals.first().map(|interval| interval.start)
    }

    pub fn end(&self) -> Option<u64> {
        self.intervals.last().map(|interval| interval.end)
    }

    pub fn total_duration(&self) -> u64 {
        self.intervals.iter().map(ExecutionInterval::duration).sum()
    }

    pub fn is_contiguous(&self) -> bool {
        self.intervals
            .windows(2)
            .all(|pair| pair[0].end == pair[1].start)
    }

    /// Who holds the CPU at instant `time` (half-open intervals).
    pub fn occupant_at(&self, time: u64) -> Option<&Occupant> {
        self.intervals
            .iter()
            .find(|interval| interval.start <= time && time < interval.end)
            .map(|interval| &interval.occupant)
    }

    /// The timeline cut off at `time`, for progressive rendering.
    pub fn until(&self, time: u64) -> Timeline {
        let mut cut = Timeline::new();
        for interval in &self.intervals {
            if interval.start >= time {
                break;
            }
            cut.push(interval.occupant.clone(), interval.start, interval.end.min(time));
        }
        cut
    }

    pub fn busy_time(&self) -> u64 {
        self.time_where(|occupant| matches!(occupant, Occupant::Process(_)))
    }

    pub fn idle_time(&self) -> u64 {
        self.time_where(|occupant| matches!(occupant, Occupant::Idle))
    }

    pub fn switch_time(&self) -> u64 {
        self.time_where(|occupant| matches!(occupant, Occupant::Switch))
    }

    pub fn switch_count(&self) -> usize {
        self.intervals
            .iter()
            .filter(|interval| interval.occupant == Occupant::Switch)
            .count()
    }

    fn time_where(&self, predicate: impl Fn(&Occupant) -> bool) -> u64 {
        self.intervals
            .iter()
            .filter(|interval| predicate(&interval.occupant))
            .map(ExecutionInterval::duration)
            .sum()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MetricsRecord {
    pub process_id: String,
    pub arrival_time: u64,
    pub burst_time: u64,
    pub start_time: u64,
    pub completion_time: u64,
    pub waiting_time: u64,
    pub turnaround_time: u64,
    pub response_time: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Averages {
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    pub avg_response: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultBundle {
    pub algorithm: AlgoConfig,
    pub preemptive: bool,
    pub timeline: Timeline,
    pub per_process_metrics: Vec<MetricsRecord>,
    pub averages: Averages,
    pub cpu_utilization_pct: f64,
    pub context_switches: usize,
}

impl ResultBundle {
    pub fn metrics_for(&self, process_id: &str) -> Option<&MetricsRecord> {
        self.per_process_metrics
            .iter()
            .find(|record| record.process_id == process_id)
    }
}

/// Output of one "simulate all" request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub parameters: SimParams,
    pub results: Vec<ResultBundle>,
}

impl ComparisonResult {
    pub fn get(&self, algorithm: AlgoConfig) -> Option<&ResultBundle> {
        self.results
            .iter()
            .find(|bundle| bundle.algorithm == algorithm)
    }
}
