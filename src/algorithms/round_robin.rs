use std::collections::VecDeque;

use crate::algorithms::{SchedulingStrategy, Selection, SelectionContext};
use crate::models::AlgoConfig;

/// FIFO ready queue with a fixed quantum. Arrivals are queued before a
/// process whose quantum expired at the same instant.
pub struct RoundRobinStrategy {
    quantum: u64,
    queue: VecDeque<usize>,
}

impl RoundRobinStrategy {
    pub fn new(quantum: u64) -> Self {
        Self {
            quantum,
            queue: VecDeque::new(),
        }
    }

    pub fn queued(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }
}

impl SchedulingStrategy for RoundRobinStrategy {
    fn algorithm(&self) -> AlgoConfig {
        AlgoConfig::Rr
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn on_arrival(&mut self, process: usize) {
        self.queue.push_back(process);
    }

    fn on_preempted(&mut self, process: usize) {
        self.queue.push_back(process);
    }

    fn time_slice(&self, remaining: u64) -> u64 {
        remaining.min(self.quantum)
    }

    fn select(&mut self, _ctx: &SelectionContext) -> Option<Selection> {
        self.queue.pop_front().map(Selection::new)
    }
}
