//! Global ILP-bounded path selection: let the solver pick directly, subject to one global cap.

use std::time::Instant;

use log::info;

use crate::config::NetworkConfig;
use crate::error::{Error, Result};
use crate::pptc::Pptc;
use crate::solver::{Compose, EpochComposition, Fairness};
use crate::topology::Topology;
use crate::traffic_class::Application;

use super::Selection;

/// Compose every application into a single optimization, add a global cap of
/// `(num_nodes - 1)^2 * k` chosen paths, and let the solver choose directly.
pub fn select_ilp(
    apps: &[Application],
    topo: &Topology,
    netcfg: &NetworkConfig,
    k: usize,
    fairness: Fairness,
    epoch_mode: EpochComposition,
    composer: &dyn Compose,
) -> Result<Selection> {
    let start = Instant::now();
    let pptc = Pptc::from_apps(apps);

    let mut opt = composer.compose_apps(apps, topo, netcfg, fairness, epoch_mode, &pptc)?;
    let cap = (topo.num_nodes().saturating_sub(1)).pow(2) * k;
    info!("select_ilp: capping global path count at {cap}");
    opt.cap_num_paths(cap);
    opt.solve()?;

    if !opt.is_solved() {
        return Err(Error::Unsolvable);
    }

    let solver_wall = opt.get_time();
    let chosen = opt.get_chosen_paths(false);
    Ok(Selection {
        best_opt: opt,
        chosen,
        total_wall: start.elapsed(),
        solver_wall,
    })
}
