use crate::algorithms::{SchedulingStrategy, Selection, SelectionContext};
use crate::models::AlgoConfig;

/// Shortest process next. Ranks by the original burst, never the remaining
/// time, since a dispatched process is never interrupted.
#[derive(Default)]
pub struct SpnStrategy;

impl SchedulingStrategy for SpnStrategy {
    fn algorithm(&self) -> AlgoConfig {
        AlgoConfig::Spn
    }

    fn select(&mut self, ctx: &SelectionContext) -> Option<Selection> {
        ctx.ready
            .iter()
            .copied()
            .min_by_key(|&idx| {
                let process = ctx.process(idx);
                (process.burst_time, process.arrival_time, idx)
            })
            .map(|idx| Selection::scored(idx, ctx.process(idx).burst_time as f64))
    }
}
