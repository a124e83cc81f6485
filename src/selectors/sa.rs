//! Simulated-annealing path selection: anneal per-traffic-class masks via expel/replace steps,
//! accepting a new composition only when it does not worsen the objective.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::NetworkConfig;
use crate::error::{Error, Result};
use crate::expel::{expel, ExpelMode};
use crate::pathtree::PathTree;
use crate::pptc::Pptc;
use crate::replace::{replace, ReplaceMode};
use crate::rng::Rng;
use crate::scoring::{length_order, path_score_order};
use crate::solver::{Compose, EpochComposition, Fairness};
use crate::topology::Topology;
use crate::traffic_class::{Application, TcId};

use super::{k_shortest_paths, Selection};

/// Acceptance probability for a hill-climbing annealer: `1` if the new objective is at least as
/// good as the old one, `0` otherwise. Never worsens the running best.
///
/// ```text
/// // Metropolis alternative, kept for reference:
/// // fn acceptance(old: f64, new: f64, t: f64) -> f64 {
/// //     if new >= old { 1.0 } else { ((new - old) / t).exp() }
/// // }
/// ```
fn acceptance(old: f64, new: f64, _t: f64) -> f64 {
    if old <= new {
        1.0
    } else {
        0.0
    }
}

/// Simulated annealing over mask-space, per traffic class.
///
/// `t_start` is the initial temperature (upstream default `0.72`), `c` the per-iteration cooling
/// factor (upstream default `0.88`); both are carried through and logged even though the shipped
/// acceptance rule is hill-climbing, so that a future Metropolis variant needs no signature change.
#[allow(clippy::too_many_arguments)]
pub fn select_sa(
    apps: &[Application],
    topo: &Topology,
    netcfg: &NetworkConfig,
    k: usize,
    max_iter: usize,
    t_start: f64,
    c: f64,
    fairness: Fairness,
    epoch_mode: EpochComposition,
    expel_mode: ExpelMode,
    replace_mode: ReplaceMode,
    weights: &HashMap<String, f64>,
    rng: &mut Rng,
    composer: &dyn Compose,
) -> Result<Selection> {
    let start = Instant::now();
    let mut solver_wall = Duration::ZERO;

    let mut pptc = Pptc::from_apps(apps);
    let tcs: Vec<TcId> = pptc.tcs().collect();

    // §4.2 orders: `NextSorted`/`PathTree`/`Random` walk a length order; `PathScore` walks a
    // one-time path-score order computed here, not recomputed per iteration.
    let orders: HashMap<TcId, Vec<usize>> = tcs
        .iter()
        .map(|&tc| {
            let paths = pptc.all_paths(tc);
            let order = match replace_mode {
                ReplaceMode::PathScore => path_score_order(paths, topo, weights),
                _ => length_order(paths),
            };
            (tc, order)
        })
        .collect();

    let mut trees: HashMap<TcId, PathTree> =
        tcs.iter().map(|&tc| (tc, PathTree::new(pptc.all_paths(tc)))).collect();

    let mut explored: HashMap<TcId, Vec<Vec<bool>>> = HashMap::new();

    // Phase 0: feasibility. Seed with a k-shortest mask and keep retrying with `expel=All` until
    // the solver reports a feasible solution or the iteration budget runs out.
    k_shortest_paths(&mut pptc, k);
    for &tc in &tcs {
        explored.entry(tc).or_default().push(pptc.mask_of(tc).to_vec());
    }

    let mut opt = composer.compose_apps(apps, topo, netcfg, fairness, epoch_mode, &pptc)?;
    opt.solve()?;
    solver_wall += opt.get_time();

    let mut feasibility_iters = 0usize;
    while !opt.is_solved() {
        if feasibility_iters >= max_iter {
            return Err(Error::Unsolvable);
        }
        feasibility_iters += 1;
        for &tc in &tcs {
            let mut mask = pptc.mask_of(tc).to_vec();
            expel(tc, &mut mask, None, ExpelMode::All, rng);
            replace(
                explored.entry(tc).or_default(),
                &mut mask,
                k,
                replace_mode,
                &orders[&tc],
                trees.get_mut(&tc),
                rng,
            );
            pptc.mask(tc, mask).expect("mask length preserved by expel/replace");
        }
        opt = composer.compose_apps(apps, topo, netcfg, fairness, epoch_mode, &pptc)?;
        opt.solve()?;
        solver_wall += opt.get_time();
    }

    let mut best_opt = opt;
    let mut best_paths = pptc.clone();
    let mut old_obj = best_opt.get_solved_objective();
    info!("select_sa: feasible seed found after {feasibility_iters} retries, obj={old_obj}");

    // Phase 1: annealing.
    for k_iter in 1..=max_iter {
        let t = t_start * c.powi(k_iter as i32);

        let mut candidate = best_paths.clone();
        for &tc in &tcs {
            if k >= candidate.all_paths(tc).len() {
                continue;
            }
            let mut mask = best_paths.mask_of(tc).to_vec();
            let xps = best_opt.get_xps();
            expel(tc, &mut mask, Some(xps), expel_mode, rng);
            replace(
                explored.entry(tc).or_default(),
                &mut mask,
                k,
                replace_mode,
                &orders[&tc],
                trees.get_mut(&tc),
                rng,
            );
            candidate.mask(tc, mask).expect("mask length preserved by expel/replace");
        }

        let mut opt = composer.compose_apps(apps, topo, netcfg, fairness, epoch_mode, &candidate)?;
        opt.solve()?;
        solver_wall += opt.get_time();
        if !opt.is_solved() {
            continue;
        }

        let new_obj = opt.get_solved_objective();
        let p = acceptance(old_obj, new_obj, t);
        let accept = rng.uniform() <= p;
        debug!(
            "select_sa: k_iter={k_iter} t={t:.4} old_obj={old_obj} new_obj={new_obj} accept={accept}"
        );
        if accept {
            old_obj = new_obj;
            best_paths = candidate;
            best_opt = opt;
        }
    }

    Ok(Selection {
        best_opt,
        chosen: best_paths,
        total_wall: start.elapsed(),
        solver_wall,
    })
}
