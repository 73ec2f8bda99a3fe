use crate::algorithms::{SchedulingStrategy, Selection, SelectionContext};
use crate::models::AlgoConfig;

/// First-come, first-served. Runs each process to completion.
#[derive(Default)]
pub struct FcfsStrategy;

impl SchedulingStrategy for FcfsStrategy {
    fn algorithm(&self) -> AlgoConfig {
        AlgoConfig::Fcfs
    }

    fn select(&mut self, ctx: &SelectionContext) -> Option<Selection> {
        ctx.ready
            .iter()
            .copied()
            .min_by_key(|&idx| (ctx.process(idx).arrival_time, idx))
            .map(Selection::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{ctx, fixture};

    #[test]
    fn fcfs_picks_earliest_arrival() {
        let (processes, runtime) = fixture(&[("late", 4, 1), ("early", 1, 9), ("mid", 2, 3)]);
        let ready = [0usize, 1, 2];
        let mut strategy = FcfsStrategy;
        let selection = strategy
            .select(&ctx(&processes, &runtime, &ready, None, 4))
            .unwrap();
        assert_eq!(processes[selection.process].id, "early");
    }

    #[test]
    fn fcfs_breaks_arrival_ties_by_id() {
        let (processes, runtime) = fixture(&[("P2", 0, 1), ("P1", 0, 1)]);
        let ready = [0usize, 1];
        let mut strategy = FcfsStrategy;
        let selection = strategy
            .select(&ctx(&processes, &runtime, &ready, None, 0))
            .unwrap();
        assert_eq!(processes[selection.process].id, "P1");
    }

    #[test]
    fn fcfs_returns_none_when_nothing_is_ready() {
        let (processes, runtime) = fixture(&[("P1", 5, 1)]);
        let mut strategy = FcfsStrategy;
        assert!(strategy
            .select(&ctx(&processes, &runtime, &[], None, 0))
            .is_none());
    }
}
