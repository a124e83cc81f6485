//! Expel policy: given a traffic class's current mask and the solver's flow variables, decide
//! which currently-visible paths to suppress before a replace step runs.

use crate::rng::Rng;
use crate::solver::{FlowVar, Xps};
use crate::traffic_class::TcId;

/// Which expel policy to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpelMode {
    /// Mask any currently-visible path whose flow is zero across every epoch.
    NoFlow = 1,
    /// Mask a currently-visible path with probability `1 - mean_flow`.
    InverseFlow = 2,
    /// Mask every currently-visible path with probability `0.5`.
    Random = 3,
    /// Mask every path.
    All = 4,
}

/// Apply `mode` to `mask` in place for traffic class `tc`.
///
/// `xps` indexes by `(tc, visible_path_idx, epoch)`: visible paths map densely to solver
/// variables, so this walks the mask with a running counter over visible positions rather than
/// indexing `xps` by raw path index.
pub fn expel(tc: TcId, mask: &mut [bool], xps: Option<&Xps>, mode: ExpelMode, rng: &mut Rng) {
    match mode {
        ExpelMode::All => mask.iter_mut().for_each(|m| *m = true),
        ExpelMode::Random => {
            for m in mask.iter_mut().filter(|m| !**m) {
                if rng.coin(0.5) {
                    *m = true;
                }
            }
        }
        ExpelMode::NoFlow => {
            let Some(xps) = xps else { return };
            let mut visible_col = 0usize;
            for m in mask.iter_mut() {
                if *m {
                    continue;
                }
                let all_zero = flows_for(xps, tc, visible_col)
                    .all(|f| f.value().abs() < f64::EPSILON);
                if all_zero {
                    *m = true;
                }
                visible_col += 1;
            }
        }
        ExpelMode::InverseFlow => {
            let Some(xps) = xps else { return };
            let mut visible_col = 0usize;
            for m in mask.iter_mut() {
                if *m {
                    continue;
                }
                let decisions: Vec<f64> = flows_for(xps, tc, visible_col)
                    .filter_map(|f| match f {
                        FlowVar::Decision(v) => Some(*v),
                        FlowVar::Const(_) => None,
                    })
                    .collect();
                let mean = if decisions.is_empty() {
                    0.0
                } else {
                    decisions.iter().sum::<f64>() / decisions.len() as f64
                };
                if rng.coin(1.0 - mean) {
                    *m = true;
                }
                visible_col += 1;
            }
        }
    }
}

fn flows_for(xps: &Xps, tc: TcId, visible_col: usize) -> impl Iterator<Item = &FlowVar> {
    xps.iter()
        .filter(move |((t, col, _), _)| *t == tc && *col == visible_col)
        .map(|(_, v)| v)
}
