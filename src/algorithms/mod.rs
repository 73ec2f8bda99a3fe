mod fcfs;
mod hrrn;
mod round_robin;
mod spn;
mod srtf;

use crate::models::AlgoConfig;
use crate::state::{Process, ProcessRuntimeState, SimParams};

pub use fcfs::FcfsStrategy;
pub use hrrn::{response_ratio, HrrnStrategy, ResponseRatio};
pub use round_robin::RoundRobinStrategy;
pub use spn::SpnStrategy;
pub use srtf::SrtfStrategy;

/// Decides which ready process gets the CPU at a decision point.
///
/// The engine owns the clock and the timeline; a strategy only ranks
/// processes. Strategies that need their own bookkeeping (the round robin
/// queue) get it through the `on_arrival`/`on_preempted` notifications.
pub trait SchedulingStrategy {
    fn algorithm(&self) -> AlgoConfig;

    /// Whether a running process can lose the CPU before it finishes.
    fn is_preemptive(&self) -> bool {
        false
    }

    /// Whether every arrival is a decision point for the running process.
    fn preempts_on_arrival(&self) -> bool {
        false
    }

    /// Called once per process when it becomes ready, in tie-break order.
    fn on_arrival(&mut self, _process: usize) {}

    /// Called when a slice ended with work left, after same-instant arrivals.
    fn on_preempted(&mut self, _process: usize) {}

    /// Longest slice a dispatched process may run before the next decision.
    fn time_slice(&self, remaining: u64) -> u64 {
        remaining
    }

    fn select(&mut self, ctx: &SelectionContext) -> Option<Selection>;
}

/// Read-only view of one run handed to a strategy at a decision point.
///
/// `processes` is sorted by arrival time then id, so a smaller index always
/// wins the default tie-break. `ready` holds indices in ascending order.
pub struct SelectionContext<'a> {
    pub processes: &'a [Process],
    pub runtime: &'a [ProcessRuntimeState],
    pub ready: &'a [usize],
    /// The process whose slice just ended with work left, or the one just
    /// switched in when arrivals landed during the switch.
    pub current: Option<usize>,
    pub clock: u64,
}

impl SelectionContext<'_> {
    pub fn remaining(&self, idx: usize) -> u64 {
        self.runtime[idx].remaining_time
    }

    pub fn process(&self, idx: usize) -> &Process {
        &self.processes[idx]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub process: usize,
    /// The ranking value that won, for diagnostics.
    pub score: Option<f64>,
}

impl Selection {
    pub fn new(process: usize) -> Self {
        Self {
            process,
            score: None,
        }
    }

    pub fn scored(process: usize, score: f64) -> Self {
        Self {
            process,
            score: Some(score),
        }
    }
}

pub fn build_strategy(algo: AlgoConfig, params: &SimParams) -> Box<dyn SchedulingStrategy> {
    match algo {
        AlgoConfig::Fcfs => Box::new(FcfsStrategy),
        AlgoConfig::Spn => Box::new(SpnStrategy),
        AlgoConfig::Hrrn => Box::new(HrrnStrategy),
        AlgoConfig::Rr => Box::new(RoundRobinStrategy::new(params.time_quantum)),
        AlgoConfig::Srtf => Box::new(SrtfStrategy),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Processes from `(id, arrival, burst)` triples, sorted the way the
    /// engine sorts them, with fresh runtime state.
    pub fn fixture(specs: &[(&str, i64, i64)]) -> (Vec<Process>, Vec<ProcessRuntimeState>) {
        let mut processes: Vec<Process> = specs
            .iter()
            .map(|(id, arrival, burst)| Process::new(*id, *arrival, *burst).unwrap())
            .collect();
        processes.sort_by(|a, b| a.tie_break_cmp(b));
        let runtime = processes.iter().map(ProcessRuntimeState::new).collect();
        (processes, runtime)
    }

    pub fn ctx<'a>(
        processes: &'a [Process],
        runtime: &'a [ProcessRuntimeState],
        ready: &'a [usize],
        current: Option<usize>,
        clock: u64,
    ) -> SelectionContext<'a> {
        SelectionContext {
            processes,
            runtime,
            ready,
            current,
            clock,
        }
    }
}
