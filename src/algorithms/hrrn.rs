use std::cmp::Ordering;

use crate::algorithms::{SchedulingStrategy, Selection, SelectionContext};
use crate::models::AlgoConfig;
use crate::state::Process;

/// `(waited + burst) / burst`, kept as an exact fraction.
#[derive(Clone, Copy, Debug)]
pub struct ResponseRatio {
    pub numerator: u64,
    pub denominator: u64,
}

impl ResponseRatio {
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl Ord for ResponseRatio {
    fn cmp(&self, other: &Self) -> Ordering {
        let left = self.numerator as u128 * other.denominator as u128;
        let right = other.numerator as u128 * self.denominator as u128;
        left.cmp(&right)
    }
}

impl PartialOrd for ResponseRatio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ResponseRatio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ResponseRatio {}

/// Response ratio of `process` at `clock`. Only meaningful once it arrived.
pub fn response_ratio(process: &Process, clock: u64) -> ResponseRatio {
    let waited = clock.saturating_sub(process.arrival_time);
    ResponseRatio {
        numerator: waited + process.burst_time,
        denominator: process.burst_time,
    }
}

/// Highest response ratio next. Ratios are recomputed at each decision point
/// only; the chosen process then runs to completion.
#[derive(Default)]
pub struct HrrnStrategy;

impl SchedulingStrategy for HrrnStrategy {
    fn algorithm(&self) -> AlgoConfig {
        AlgoConfig::Hrrn
    }

    fn select(&mut self, ctx: &SelectionContext) -> Option<Selection> {
        ctx.ready
            .iter()
            .copied()
            .map(|idx| (idx, response_ratio(ctx.process(idx), ctx.clock)))
            .min_by(|(a, ratio_a), (b, ratio_b)| {
                let pa = ctx.process(*a);
                let pb = ctx.process(*b);
                ratio_b
                    .cmp(ratio_a)
                    .then_with(|| pa.burst_time.cmp(&pb.burst_time))
                    .then_with(|| pa.arrival_time.cmp(&pb.arrival_time))
                    .then_with(|| a.cmp(b))
            })
            .map(|(idx, ratio)| Selection::scored(idx, ratio.as_f64()))
    }
}
