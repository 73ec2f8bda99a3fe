use std::thread;
use tracing::info;

use crate::engine::{run_algorithm, validate_params, validate_processes};
use crate::error::{Error, Result};
use crate::models::{AlgoConfig, SimConfig};
use crate::state::{ComparisonResult, Process, ResultBundle, SimParams};

/// Runs a set of algorithms over one validated process set.
///
/// Every algorithm gets its own engine and runtime state; the process list
/// and parameters are shared read-only. Results always come back in the
/// canonical order FCFS, SPN, HRRN, RR, SRTF regardless of how the
/// algorithms were requested.
#[derive(Clone, Debug)]
pub struct Orchestrator {
    processes: Vec<Process>,
    params: SimParams,
    algorithms: Vec<AlgoConfig>,
    parallel: bool,
}

impl Orchestrator {
    pub fn new(processes: Vec<Process>, params: SimParams) -> Self {
        Self {
            processes,
            params,
            algorithms: AlgoConfig::all(),
            parallel: false,
        }
    }

    /// Validates a raw config. Nothing runs if any process or parameter is
    /// rejected.
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        let algorithms = canonical(&config.algorithms);
        let processes = validate_processes(&config.processes)?;
        let params = validate_params(config, &algorithms)?;
        Ok(Self {
            processes,
            params,
            algorithms,
            parallel: config.parallel,
        })
    }

    pub fn with_algorithms(mut self, algorithms: &[AlgoConfig]) -> Self {
        self.algorithms = canonical(algorithms);
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn algorithms(&self) -> &[AlgoConfig] {
        &self.algorithms
    }

    pub fn run(&self) -> Result<ComparisonResult> {
        let results = if self.parallel {
            self.run_parallel()?
        } else {
            self.algorithms
                .iter()
                .map(|&algo| self.run_one(algo))
                .collect::<Result<Vec<_>>>()?
        };

        Ok(ComparisonResult {
            parameters: self.params,
            results,
        })
    }

    fn run_one(&self, algo: AlgoConfig) -> Result<ResultBundle> {
        let bundle = run_algorithm(&self.processes, &self.params, algo)?;
        info!(
            algorithm = %algo,
            avg_waiting = bundle.averages.avg_waiting,
            avg_turnaround = bundle.averages.avg_turnaround,
            avg_response = bundle.averages.avg_response,
            "algorithm run complete"
        );
        Ok(bundle)
    }

    fn run_parallel(&self) -> Result<Vec<ResultBundle>> {
        thread::scope(|scope| {
            let handles: Vec<_> = self
                .algorithms
                .iter()
                .map(|&algo| (algo, scope.spawn(move || self.run_one(algo))))
                .collect();

            handles
                .into_iter()
                .map(|(algo, handle)| {
                    handle
                        .join()
                        .map_err(|_| Error::incomplete(algo, "simulation thread panicked"))?
                })
                .collect()
        })
    }
}

/// One "simulate all" request: validate, run, return the bundles.
pub fn run_comparison(config: &SimConfig) -> Result<ComparisonResult> {
    Orchestrator::from_config(config)?.run()
}

/// Sorted, deduplicated; an empty request means every algorithm.
fn canonical(algorithms: &[AlgoConfig]) -> Vec<AlgoConfig> {
    if algorithms.is_empty() {
        return AlgoConfig::all();
    }
    let mut algorithms = algorithms.to_vec();
    algorithms.sort();
    algorithms.dedup();
    algorithms
}
