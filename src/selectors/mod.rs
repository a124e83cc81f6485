//! Top-level path-selection strategies.
//!
//! Every selector takes ownership of a [`Pptc`] mask step, drives the solver, and returns
//! `(best_opt, chosen_pptc, total_wall, solver_wall)`.

use std::time::Duration;

use crate::pptc::Pptc;
use crate::solver::Opt;

mod ilp;
mod iterative;
mod k_resource;
mod k_shortest;
mod random;
mod sa;

pub use ilp::select_ilp;
pub use iterative::select_iterative;
pub use k_resource::k_resource_paths;
pub use k_shortest::k_shortest_paths;
pub use random::choose_rand;
pub use sa::select_sa;

/// Which order to preorder candidate paths in, used by [`select_iterative`] and the SA replace
/// policies that rely on a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Ascending path length.
    Len,
    /// Descending resource score.
    Resource,
}

/// The shape every top-level selector returns: the final solved optimization, the PPTC masked to
/// the chosen solution, the selector's total wall time, and the wall time spent inside the
/// solver specifically.
pub struct Selection {
    /// The final solved optimization.
    pub best_opt: Box<dyn Opt>,
    /// The PPTC, masked to the chosen solution.
    pub chosen: Pptc,
    /// Total wall time spent in the selector.
    pub total_wall: Duration,
    /// Wall time spent inside the solver across every `solve()` call.
    pub solver_wall: Duration,
}
