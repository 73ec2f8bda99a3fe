use crate::algorithms::{SchedulingStrategy, Selection, SelectionContext};
use crate::models::AlgoConfig;

/// Shortest remaining time first. The running process keeps the CPU unless
/// a ready process has strictly less work left.
#[derive(Default)]
pub struct SrtfStrategy;

impl SchedulingStrategy for SrtfStrategy {
    fn algorithm(&self) -> AlgoConfig {
        AlgoConfig::Srtf
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn preempts_on_arrival(&self) -> bool {
        true
    }

    fn select(&mut self, ctx: &SelectionContext) -> Option<Selection> {
        let challenger = ctx
            .ready
            .iter()
            .copied()
            .filter(|&idx| Some(idx) != ctx.current)
            .min_by_key(|&idx| (ctx.remaining(idx), ctx.process(idx).arrival_time, idx));

        let choice = match (ctx.current, challenger) {
            (Some(current), Some(other)) if ctx.remaining(other) < ctx.remaining(current) => other,
            (Some(current), _) => current,
            (None, other) => other?,
        };

        Some(Selection::scored(choice, ctx.remaining(choice) as f64))
    }
}
