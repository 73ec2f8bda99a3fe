use std::collections::HashSet;
use tracing::{debug, trace};

use crate::algorithms::{build_strategy, SchedulingStrategy, Selection, SelectionContext};
use crate::error::{Error, Result};
use crate::metrics;
use crate::models::{AlgoConfig, ProcessConfig, SimConfig};
use crate::state::{Occupant, Process, ProcessRuntimeState, ResultBundle, SimParams, Timeline};

/// Mutable state of a single algorithm run. Never shared between runs.
#[derive(Clone, Debug)]
pub struct EngineState {
    pub clock: u64,
    pub runtime: Vec<ProcessRuntimeState>,
    pub timeline: Timeline,
    /// Index of the first process that has not arrived yet.
    pub next_arrival: usize,
    /// Last process that held the CPU, or was switched in; cleared by an
    /// idle gap.
    pub last_run: Option<usize>,
    pub completed: usize,
}

/// Raw output of the timeline builder, before metrics are derived.
#[derive(Clone, Debug)]
pub struct SimulationRun {
    pub algorithm: AlgoConfig,
    pub preemptive: bool,
    pub timeline: Timeline,
    /// Processes in arrival/id order, aligned with `runtime`.
    pub processes: Vec<Process>,
    pub runtime: Vec<ProcessRuntimeState>,
}

pub struct SimulationEngine {
    pub processes: Vec<Process>,
    pub params: SimParams,
    pub strategy: Box<dyn SchedulingStrategy>,
    pub state: EngineState,
}

impl SimulationEngine {
    pub fn new(
        processes: &[Process],
        params: SimParams,
        strategy: Box<dyn SchedulingStrategy>,
    ) -> Self {
        let mut processes = processes.to_vec();
        processes.sort_by(|a, b| a.tie_break_cmp(b));
        let state = EngineState {
            clock: processes.first().map(|p| p.arrival_time).unwrap_or(0),
            runtime: processes.iter().map(ProcessRuntimeState::new).collect(),
            timeline: Timeline::new(),
            next_arrival: 0,
            last_run: None,
            completed: 0,
        };

        Self {
            processes,
            params,
            strategy,
            state,
        }
    }

    pub fn run(mut self) -> Result<SimulationRun> {
        let algorithm = self.strategy.algorithm();
        let total = self.processes.len();
        self.admit_arrivals();

        while self.state.completed < total {
            let ready = self.ready_set();
            let current = self
                .state
                .last_run
                .filter(|&idx| !self.state.runtime[idx].is_finished());
            let selection = {
                let ctx = SelectionContext {
                    processes: &self.processes,
                    runtime: &self.state.runtime,
                    ready: &ready,
                    current,
                    clock: self.state.clock,
                };
                self.strategy.select(&ctx)
            };

            match selection {
                None => self.idle_until_next_arrival()?,
                Some(selection) => {
                    if !ready.contains(&selection.process) {
                        return Err(Error::incomplete(
                            algorithm,
                            format!(
                                "strategy selected process #{} which is not ready at t={}",
                                selection.process, self.state.clock
                            ),
                        ));
                    }
                    self.run_slice(selection)?;
                }
            }
        }

        Ok(SimulationRun {
            algorithm,
            preemptive: self.strategy.is_preemptive(),
            timeline: self.state.timeline,
            processes: self.processes,
            runtime: self.state.runtime,
        })
    }

    fn ready_set(&self) -> Vec<usize> {
        (0..self.state.next_arrival)
            .filter(|&idx| !self.state.runtime[idx].is_finished())
            .collect()
    }

    fn next_arrival_time(&self) -> Option<u64> {
        self.processes
            .get(self.state.next_arrival)
            .map(|process| process.arrival_time)
    }

    /// Hands every process that arrived by now to the strategy, in order.
    /// Returns whether anything was admitted.
    fn admit_arrivals(&mut self) -> bool {
        let before = self.state.next_arrival;
        while let Some(process) = self.processes.get(self.state.next_arrival) {
            if process.arrival_time > self.state.clock {
                break;
            }
            trace!(process = %process.id, clock = self.state.clock, "arrival");
            self.strategy.on_arrival(self.state.next_arrival);
            self.state.next_arrival += 1;
        }
        self.state.next_arrival > before
    }

    fn advance(&self, by: u64) -> Result<u64> {
        self.state.clock.checked_add(by).ok_or_else(|| {
            Error::incomplete(
                self.strategy.algorithm(),
                format!("clock overflow advancing {} from t={}", by, self.state.clock),
            )
        })
    }

    fn idle_until_next_arrival(&mut self) -> Result<()> {
        let next = self.next_arrival_time().ok_or_else(|| {
            Error::incomplete(
                self.strategy.algorithm(),
                format!(
                    "no ready process and no pending arrival at t={} with {} of {} processes done",
                    self.state.clock,
                    self.state.completed,
                    self.processes.len()
                ),
            )
        })?;
        trace!(from = self.state.clock, to = next, "idle");
        self.state
            .timeline
            .push(Occupant::Idle, self.state.clock, next);
        self.state.clock = next;
        self.state.last_run = None;
        self.admit_arrivals();
        Ok(())
    }

    fn run_slice(&mut self, selection: Selection) -> Result<()> {
        let idx = selection.process;
        let switch = self.params.context_switch_time;
        if let Some(previous) = self.state.last_run {
            if previous != idx && switch > 0 {
                let start = self.state.clock;
                let end = self.advance(switch)?;
                self.state.timeline.push(Occupant::Switch, start, end);
                self.state.clock = end;
                let arrived = self.admit_arrivals();
                if arrived && self.strategy.preempts_on_arrival() {
                    // The end of the switch is a decision point; `idx` is
                    // loaded and defends the CPU like a running process.
                    trace!(
                        process = %self.processes[idx].id,
                        clock = end,
                        "reselect after switch"
                    );
                    self.state.last_run = Some(idx);
                    return Ok(());
                }
            }
        }

        let remaining = self.state.runtime[idx].remaining_time;
        let mut slice = self.strategy.time_slice(remaining).min(remaining);
        if self.strategy.preempts_on_arrival() {
            if let Some(next) = self.next_arrival_time() {
                slice = slice.min(next - self.state.clock);
            }
        }
        if slice == 0 {
            return Err(Error::incomplete(
                self.strategy.algorithm(),
                format!("empty slice for '{}'", self.processes[idx].id),
            ));
        }

        let start = self.state.clock;
        let end = self.advance(slice)?;
        let process_id = self.processes[idx].id.clone();
        debug!(
            algorithm = %self.strategy.algorithm(),
            process = %process_id,
            start,
            end,
            score = ?selection.score,
            "dispatch"
        );

        let runtime = &mut self.state.runtime[idx];
        runtime.dispatch(start);
        let finished = runtime.execute(slice, end);
        self.state
            .timeline
            .push(Occupant::Process(process_id), start, end);
        self.state.clock = end;
        self.state.last_run = Some(idx);
        if finished {
            self.state.completed += 1;
        }

        // Same-instant arrivals go ahead of the process that just ran.
        self.admit_arrivals();
        if !finished {
            self.strategy.on_preempted(idx);
        }
        Ok(())
    }
}

/// Runs one algorithm over validated processes and derives its metrics.
pub fn run_algorithm(
    processes: &[Process],
    params: &SimParams,
    algorithm: AlgoConfig,
) -> Result<ResultBundle> {
    if algorithm == AlgoConfig::Rr && params.time_quantum == 0 {
        return Err(Error::InvalidTimeQuantum(0));
    }
    check_horizon(processes)?;
    let strategy = build_strategy(algorithm, params);
    let run = SimulationEngine::new(processes, *params, strategy).run()?;
    metrics::build_bundle(run, processes)
}

pub fn validate_processes(configs: &[ProcessConfig]) -> Result<Vec<Process>> {
    if configs.is_empty() {
        return Err(Error::EmptyProcesses);
    }
    let mut ids = HashSet::new();
    let mut processes = Vec::with_capacity(configs.len());
    for config in configs {
        let process = Process::new(config.id.clone(), config.arrival_time, config.burst_time)?;
        if !ids.insert(process.id.clone()) {
            return Err(Error::DuplicateProcessId(process.id));
        }
        processes.push(process);
    }
    check_horizon(&processes)?;
    Ok(processes)
}

/// Rejects process sets whose work cannot fit on a `u64` clock even without
/// context switches.
fn check_horizon(processes: &[Process]) -> Result<()> {
    let latest_arrival = processes
        .iter()
        .map(|process| process.arrival_time)
        .max()
        .unwrap_or(0);
    let total_burst: u128 = processes
        .iter()
        .map(|process| process.burst_time as u128)
        .sum();
    if latest_arrival as u128 + total_burst > u64::MAX as u128 {
        return Err(Error::TimeHorizonOverflow {
            latest_arrival,
            total_burst,
        });
    }
    Ok(())
}

/// The quantum is only checked when round robin is among `algorithms`;
/// otherwise an unusable quantum is recorded as 0.
pub fn validate_params(config: &SimConfig, algorithms: &[AlgoConfig]) -> Result<SimParams> {
    if config.context_switch_time < 0 {
        return Err(Error::NegativeContextSwitch(config.context_switch_time));
    }
    let wants_rr = algorithms.contains(&AlgoConfig::Rr);
    if wants_rr && config.time_quantum <= 0 {
        return Err(Error::InvalidTimeQuantum(config.time_quantum));
    }
    Ok(SimParams {
        time_quantum: config.time_quantum.max(0) as u64,
        context_switch_time: config.context_switch_time as u64,
    })
}
