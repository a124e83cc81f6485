//! The external solver contract (§6 of the design notes).
//!
//! The core treats the optimizer as an opaque collaborator: `Compose::compose_apps` builds one
//! from a set of applications, and the returned [`Opt`] is solved, queried, and discarded. Two
//! backends implement the contract: [`cbc::CbcComposer`] (behind the `coin-cbc` feature) builds a
//! real binary ILP with `good_lp`; [`fake::ScriptedComposer`] is a deterministic stand-in used by
//! the test suite and by selectors' own unit tests.

use std::collections::HashMap;
use std::path::Path as FsPath;
use std::time::Duration;

use crate::config::NetworkConfig;
use crate::error::Result;
use crate::pptc::Pptc;
use crate::topology::Topology;
use crate::traffic_class::{Application, TcId};

#[cfg(feature = "coin-cbc")]
pub mod cbc;
pub mod fake;

/// Fairness rule the solver composes applications under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fairness {
    /// Maximize the weighted sum of served traffic.
    Weighted,
    /// Reserved for additional fairness rules no shipped backend implements yet; composers reject
    /// it with [`crate::error::Error::InvalidConfig`].
    Unimplemented,
}

/// How per-epoch objectives are combined into a single solved objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpochComposition {
    /// Optimize for the worst (minimum) epoch.
    Worst,
    /// Optimize the average epoch.
    Average,
    /// Optimize the sum across epochs.
    Sum,
}

/// A solver decision variable's resolved value: either a constant injected by the composer (e.g.
/// a path that was pre-masked out) or a value the solver actually optimized over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlowVar {
    /// A fixed value, not subject to optimization.
    Const(f64),
    /// A solved decision variable's value.
    Decision(f64),
}

impl FlowVar {
    /// The numeric value, regardless of variant.
    pub fn value(&self) -> f64 {
        match self {
            FlowVar::Const(v) | FlowVar::Decision(v) => *v,
        }
    }
}

/// Sparse flow-variable tensor: `(tc, visible_path_idx, epoch) -> value`. Visible paths map
/// densely to solver variables; this is never indexed by raw path index.
pub type Xps = HashMap<(TcId, usize, usize), FlowVar>;

/// The external optimizer's contract, as seen by the selectors.
pub trait Opt: std::fmt::Debug {
    /// Add a global cap on the total number of chosen paths across all traffic classes.
    fn cap_num_paths(&mut self, cap: usize);

    /// Solve the composed optimization. Blocking.
    fn solve(&mut self) -> Result<()>;

    /// Whether the last `solve()` call found a feasible solution.
    fn is_solved(&self) -> bool;

    /// Solver-internal wall time of the last `solve()` call.
    fn get_time(&self) -> Duration;

    /// The solved objective value.
    fn get_solved_objective(&self) -> f64;

    /// Solver-selected paths, with masks updated to match the chosen solution.
    ///
    /// `relaxed = true` asks for the LP relaxation's fractional solution instead of an integral
    /// one, where the backend supports it.
    fn get_chosen_paths(&self, relaxed: bool) -> Pptc;

    /// The flow-variable tensor for the last solved instance.
    fn get_xps(&self) -> &Xps;

    /// Best-effort dump of the composed model; failures are logged, never propagated.
    fn write(&self, path: &FsPath) -> std::io::Result<()>;

    /// Best-effort dump of the solved solution; failures are logged, never propagated.
    fn write_solution(&self, path: &FsPath) -> std::io::Result<()>;
}

/// Builds an [`Opt`] from a set of applications and a topology.
pub trait Compose {
    /// Compose `apps` into a single optimization instance over `topo`, honoring `fairness` and
    /// `epoch_mode`, restricted to the paths currently visible in `pptc`.
    fn compose_apps(
        &self,
        apps: &[Application],
        topo: &Topology,
        netcfg: &NetworkConfig,
        fairness: Fairness,
        epoch_mode: EpochComposition,
        pptc: &Pptc,
    ) -> Result<Box<dyn Opt>>;
}
