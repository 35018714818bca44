//! Hypothesis-space search driver (component C5): one expansion/score/prune
//! step, and the multi-round driver that chains steps per a caller-supplied
//! byte schedule.

use crate::corr::batch::correlate;
use crate::error::Error;
use crate::hypothesis::{expand, filter, KeyHypothesis};
use crate::measurement::Measurements;
use crate::oracle::{mask_for_hypothesis, predict_hw};
use crate::simon::{CipherParams, IntermediateKind};
use crate::word::Word;

/// Expand every hypothesis in `frontier` under `new_mask`, score each
/// child's peak absolute correlation against `measurements`, and prune by
/// `threshold`.
///
/// `round`/`kind` select which intermediate state the children are scored
/// against; the mask fed to the oracle is derived directly from
/// `new_mask`, since that is what the children just fixed.
pub fn step(
    frontier: &[KeyHypothesis],
    measurements: &Measurements,
    params: CipherParams,
    new_mask: &[Word],
    round: usize,
    kind: IntermediateKind,
    threshold: f64,
) -> Result<Vec<KeyHypothesis>, Error> {
    let mut children = Vec::new();
    for h in frontier {
        children.extend(expand(params, h, new_mask)?);
    }
    if children.is_empty() {
        return Ok(children);
    }

    let probe = KeyHypothesis {
        key: vec![0; params.m],
        mask: new_mask.to_vec(),
        corr: 0.0,
    };
    let hw_mask = mask_for_hypothesis(params, &probe, round, kind)?;
    let keys: Vec<Vec<Word>> = children.iter().map(|c| c.key.clone()).collect();
    let hw = predict_hw(params, measurements.plaintexts(), &keys, round, hw_mask, kind)?;
    let hw_f64 = hw.map(f64::from);

    let corr = correlate(&hw_f64, measurements.traces())?;

    for (idx, child) in children.iter_mut().enumerate() {
        child.corr = peak_abs_correlation(corr.row(idx));
    }

    Ok(filter(children, threshold))
}

/// `argmax_{|c|} c` over a correlation row, treating `NaN` as 0 — a
/// degenerate (constant) prediction column carries no evidence, not a
/// failure.
fn peak_abs_correlation(row: &[f64]) -> f64 {
    let mut best = 0.0_f64;
    for &raw in row {
        let c = if raw.is_nan() { 0.0 } else { raw };
        if c.abs() > best.abs() || (c.abs() == best.abs() && c > best) {
            best = c;
        }
    }
    best
}

/// One scheduled attack step: which bits to add to the frontier's mask,
/// which round/intermediate to score the resulting children against, and
/// the pruning threshold for that step.
#[derive(Debug, Clone)]
pub struct ScheduleStep {
    /// Mask after this step (superset of the previous step's mask).
    pub new_mask: Vec<Word>,
    /// Round targeted when scoring this step's children.
    pub round: usize,
    /// Intermediate kind targeted when scoring this step's children.
    pub kind: IntermediateKind,
    /// Pruning threshold for this step, in correlation units.
    pub threshold: f64,
}

/// Drives a full campaign: seed hypothesis, then one [`step`] per entry of
/// a caller-supplied schedule.
pub struct Driver {
    params: CipherParams,
}

impl Driver {
    /// Build a driver for the given cipher parameters.
    #[must_use]
    pub const fn new(params: CipherParams) -> Self {
        Self { params }
    }

    /// Run the full schedule against `measurements`, returning the final
    /// frontier sorted by `|corr|` descending.
    pub fn run(&self, measurements: &Measurements, schedule: &[ScheduleStep]) -> Result<Vec<KeyHypothesis>, Error> {
        let mut frontier = vec![KeyHypothesis::seed(self.params.m)];
        for sched in schedule {
            frontier = step(
                &frontier,
                measurements,
                self.params,
                &sched.new_mask,
                sched.round,
                sched.kind,
                sched.threshold,
            )?;
            if frontier.is_empty() {
                break;
            }
        }
        frontier.sort_by(|a, b| b.corr.abs().partial_cmp(&a.corr.abs()).unwrap_or(std::cmp::Ordering::Equal));
        Ok(frontier)
    }
}
