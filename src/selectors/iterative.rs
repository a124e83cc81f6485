//! Iterative-doubling path selection: grow `k` geometrically until the objective stops
//! improving materially, the iteration budget runs out, or every path is enabled.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::debug;

use crate::config::NetworkConfig;
use crate::error::{Error, Result};
use crate::pptc::Pptc;
use crate::scoring::{length_order, resource_order};
use crate::solver::{Compose, EpochComposition, Fairness};
use crate::topology::Topology;
use crate::traffic_class::{Application, TcId};

use super::{Selection, SortMode};

/// Start with `k = 5`, doubling it each round, unmasking the first `min(k, n)` indices of a
/// fixed per-TC preorder (by length or resource score) each time.
#[allow(clippy::too_many_arguments)]
pub fn select_iterative(
    apps: &[Application],
    topo: &Topology,
    netcfg: &NetworkConfig,
    max_iter: usize,
    eps: f64,
    fairness: Fairness,
    epoch_mode: EpochComposition,
    sort_mode: SortMode,
    composer: &dyn Compose,
) -> Result<Selection> {
    let start = Instant::now();
    let mut pptc = Pptc::from_apps(apps);
    let max_paths = pptc.max_paths(true);

    let orders: HashMap<TcId, Vec<usize>> = pptc
        .tcs()
        .map(|tc| {
            let paths = pptc.all_paths(tc);
            let order = match sort_mode {
                SortMode::Len => length_order(paths),
                SortMode::Resource => resource_order(paths, topo, &netcfg.default_weights),
            };
            (tc, order)
        })
        .collect();

    let mut k = 5usize;
    let mut old_obj = f64::NEG_INFINITY;
    let mut delta = f64::INFINITY;
    let mut iter = 0usize;
    let mut solver_wall = Duration::ZERO;
    let mut best: Option<(Box<dyn crate::solver::Opt>, Pptc)> = None;

    while iter < max_iter && delta > eps && k < max_paths {
        for tc in pptc.tcs().collect::<Vec<_>>() {
            let order = &orders[&tc];
            let n = order.len();
            let mut mask = vec![true; n];
            for &idx in order.iter().take(k.min(n)) {
                mask[idx] = false;
            }
            let _ = pptc.mask(tc, mask);
        }

        let mut opt = composer.compose_apps(apps, topo, netcfg, fairness, epoch_mode, &pptc)?;
        opt.solve()?;
        solver_wall += opt.get_time();

        if opt.is_solved() {
            let obj = opt.get_solved_objective();
            delta = obj - old_obj;
            old_obj = obj;
            debug!("select_iterative: iter={iter} k={k} obj={obj} delta={delta}");
            let chosen = opt.get_chosen_paths(true);
            best = Some((opt, chosen));
        }

        iter += 1;
        k *= 2;
    }

    let (best_opt, chosen) = best.ok_or(Error::Unsolvable)?;
    Ok(Selection {
        best_opt,
        chosen,
        total_wall: start.elapsed(),
        solver_wall,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use crate::solver::fake::ScriptedComposer;
    use crate::topology::{NodeIndex, ResourceMap};
    use crate::traffic_class::TrafficClass;
    use ipnet::Ipv4Net;
    use std::str::FromStr;

    fn n(i: u32) -> crate::topology::NodeId {
        NodeIndex::new(i as usize)
    }

    fn app_with_n_paths(tc_id: TcId, n_paths: usize) -> Application {
        let tc = TrafficClass {
            id: tc_id,
            ingress: n(0),
            egress: n(1),
            priority: 0,
            vol_flows: vec![1.0],
            src_prefix: Ipv4Net::from_str("10.0.0.0/24").unwrap(),
            dst_prefix: Ipv4Net::from_str("10.0.1.0/24").unwrap(),
        };
        let paths = (0..n_paths).map(|i| Path::Plain { nodes: vec![n(0); i + 1] }).collect();
        Application { name: "app".into(), classes: vec![(tc, paths)] }
    }

    #[test]
    fn small_candidate_set_is_fully_enabled_in_one_round() {
        // n = 3 < the starting k = 5, so the first round already unmasks every candidate, and
        // the loop then stops because k doubles past max_paths.
        let topo = Topology::new(vec![ResourceMap::default(); 2], vec![], 1);
        let apps = vec![app_with_n_paths(1, 3)];
        let netcfg = NetworkConfig::default();
        let composer = ScriptedComposer::counting();
        let result = select_iterative(
            &apps,
            &topo,
            &netcfg,
            100,
            -1.0, // never stop early on eps alone
            Fairness::Weighted,
            EpochComposition::Worst,
            SortMode::Len,
            &composer,
        )
        .unwrap();
        assert_eq!(result.chosen.num_paths(1, false), 3);
    }

    #[test]
    fn unsolvable_when_no_round_ever_solves() {
        let topo = Topology::new(vec![ResourceMap::default(); 2], vec![], 1);
        let apps = vec![app_with_n_paths(1, 6)];
        let netcfg = NetworkConfig::default();
        let composer = ScriptedComposer {
            objective: Box::new(|_| 0.0),
            xps: Box::new(|_| Default::default()),
            always_solved: false,
        };
        let err = select_iterative(
            &apps,
            &topo,
            &netcfg,
            3,
            0.0,
            Fairness::Weighted,
            EpochComposition::Worst,
            SortMode::Len,
            &composer,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Unsolvable));
    }
}
