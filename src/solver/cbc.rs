//! Reference [`Opt`]/[`Compose`] backend built on `good_lp`'s `coin_cbc` solver.
//!
//! Builds one binary "is this path carrying traffic in this epoch" variable per visible
//! path per epoch, plus one binary "is this path chosen at all" variable tying its epochs
//! together, and maximizes the weighted served volume composed across epochs according to
//! `epoch_mode`. This is a real, runnable ILP, but it is deliberately the simplest model that
//! satisfies the [`Opt`] contract — richer fairness rules than `Weighted` are left unimplemented
//! (see `SPEC_FULL.md`'s open questions).

use std::cell::OnceCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path as FsPath;
use std::time::{Duration, Instant};

use good_lp::solvers::coin_cbc::{coin_cbc, CoinCbcSolution};
use good_lp::{constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable};
use log::{info, warn};

use super::{Compose, EpochComposition, Fairness, FlowVar, Opt, Xps};
use crate::config::NetworkConfig;
use crate::error::{Error, Result};
use crate::pptc::Pptc;
use crate::topology::Topology;
use crate::traffic_class::{Application, TcId};

type CappedProblem = good_lp::solvers::coin_cbc::CoinCbcProblem;

/// Reference ILP composer built on `good_lp`'s CBC backend.
#[derive(Debug, Default)]
pub struct CbcComposer;

impl Compose for CbcComposer {
    fn compose_apps(
        &self,
        apps: &[Application],
        _topo: &Topology,
        netcfg: &NetworkConfig,
        fairness: Fairness,
        epoch_mode: EpochComposition,
        pptc: &Pptc,
    ) -> Result<Box<dyn Opt>> {
        if fairness != Fairness::Weighted {
            return Err(Error::InvalidConfig {
                reason: "the coin-cbc backend only implements Fairness::Weighted".to_string(),
            });
        }

        let epochs = netcfg.epochs.max(1);

        let mut vars = ProblemVariables::new();
        let mut x: HashMap<(TcId, usize, usize), Variable> = HashMap::new();
        let mut used: HashMap<(TcId, usize), Variable> = HashMap::new();
        let mut columns: Vec<(TcId, usize, usize)> = Vec::new();
        let mut epoch_weighted_vars: Vec<Vec<(Variable, f64)>> = vec![Vec::new(); epochs];

        for app in apps {
            for (tc, _paths) in &app.classes {
                for (col, idx) in pptc.visible_indices(tc.id).enumerate() {
                    columns.push((tc.id, idx, col));
                    let u = vars.add(variable().binary());
                    used.insert((tc.id, idx), u);
                    for (epoch, weighted) in epoch_weighted_vars.iter_mut().enumerate() {
                        let v = vars.add(variable().binary());
                        x.insert((tc.id, idx, epoch), v);
                        let vol = tc.vol_flows.get(epoch).copied().unwrap_or(0.0);
                        weighted.push((v, vol));
                    }
                }
            }
        }

        let epoch_terms: Vec<Expression> = epoch_weighted_vars
            .iter()
            .map(|terms| terms.iter().map(|&(v, c)| v * c).sum())
            .collect();

        let worst_z = matches!(epoch_mode, EpochComposition::Worst).then(|| vars.add(variable()));

        let objective: Expression = match epoch_mode {
            EpochComposition::Sum => epoch_terms.iter().cloned().sum(),
            EpochComposition::Average => {
                epoch_terms.iter().cloned().sum::<Expression>() * (1.0 / epochs as f64)
            }
            EpochComposition::Worst => Expression::from(worst_z.expect("set above for Worst")),
        };

        info!(
            "composing ILP over {} path variables across {} epochs",
            used.len(),
            epochs
        );
        let mut problem = coin_cbc(vars.maximise(objective));

        // Tie each epoch's flow variable to its path's "used at all" variable, so
        // `cap_num_paths` can cap distinct chosen paths rather than path-epoch pairs.
        for (&(tc, idx), &u) in &used {
            for epoch in 0..epochs {
                if let Some(&v) = x.get(&(tc, idx, epoch)) {
                    problem = problem.with(constraint!(v <= u));
                }
            }
        }

        if let Some(z) = worst_z {
            for term in &epoch_terms {
                problem = problem.with(constraint!(z <= term.clone()));
            }
        }

        Ok(Box::new(CbcOpt {
            problem: Some(problem),
            x,
            used,
            columns,
            epoch_weighted_vars,
            epoch_mode,
            epochs,
            pptc: pptc.clone(),
            solution: None,
            solved: false,
            time: Duration::default(),
            xps_cache: OnceCell::new(),
        }))
    }
}

/// The solved (or not yet solved) state of a CBC-composed optimization.
pub struct CbcOpt {
    problem: Option<CappedProblem>,
    x: HashMap<(TcId, usize, usize), Variable>,
    used: HashMap<(TcId, usize), Variable>,
    columns: Vec<(TcId, usize, usize)>,
    epoch_weighted_vars: Vec<Vec<(Variable, f64)>>,
    epoch_mode: EpochComposition,
    epochs: usize,
    pptc: Pptc,
    solution: Option<CoinCbcSolution>,
    solved: bool,
    time: Duration,
    xps_cache: OnceCell<Xps>,
}

impl std::fmt::Debug for CbcOpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CbcOpt")
            .field("solved", &self.solved)
            .field("paths", &self.used.len())
            .field("path_epoch_vars", &self.x.len())
            .finish_non_exhaustive()
    }
}

impl Opt for CbcOpt {
    fn cap_num_paths(&mut self, cap: usize) {
        let total: Expression = self.used.values().copied().map(Expression::from).sum();
        if let Some(problem) = self.problem.take() {
            self.problem = Some(problem.with(constraint!(total <= cap as f64)));
        }
    }

    fn solve(&mut self) -> Result<()> {
        let problem = self
            .problem
            .take()
            .ok_or_else(|| Error::Solver("solve() called twice on the same Opt".to_string()))?;
        let start = Instant::now();
        match problem.solve() {
            Ok(solution) => {
                self.time = start.elapsed();
                self.solution = Some(solution);
                self.solved = true;
                Ok(())
            }
            Err(ResolutionError::Infeasible) => {
                self.time = start.elapsed();
                self.solved = false;
                Ok(())
            }
            Err(e) => Err(Error::Solver(e.to_string())),
        }
    }

    fn is_solved(&self) -> bool {
        self.solved
    }

    fn get_time(&self) -> Duration {
        self.time
    }

    fn get_solved_objective(&self) -> f64 {
        let Some(sol) = &self.solution else { return 0.0 };
        let epoch_values: Vec<f64> = self
            .epoch_weighted_vars
            .iter()
            .map(|terms| terms.iter().map(|&(v, c)| sol.value(v) * c).sum())
            .collect();
        match self.epoch_mode {
            EpochComposition::Sum => epoch_values.iter().sum(),
            EpochComposition::Average => {
                epoch_values.iter().sum::<f64>() / epoch_values.len().max(1) as f64
            }
            EpochComposition::Worst => {
                epoch_values.into_iter().fold(f64::INFINITY, f64::min)
            }
        }
    }

    fn get_chosen_paths(&self, _relaxed: bool) -> Pptc {
        let mut out = self.pptc.clone();
        let Some(sol) = &self.solution else { return out };
        for tc in out.tcs().collect::<Vec<_>>() {
            let mask = out.get_mask(tc);
            for (i, m) in mask.iter_mut().enumerate() {
                if let Some(&v) = self.used.get(&(tc, i)) {
                    *m = sol.value(v) < 0.5;
                }
            }
        }
        out
    }

    fn get_xps(&self) -> &Xps {
        self.xps_cache.get_or_init(|| self.build_xps())
    }

    fn write(&self, path: &FsPath) -> std::io::Result<()> {
        fs::write(path, format!("{:?}", self.x.keys().collect::<Vec<_>>()))
    }

    fn write_solution(&self, path: &FsPath) -> std::io::Result<()> {
        match &self.solution {
            Some(sol) => fs::write(
                path,
                self.x
                    .iter()
                    .map(|(k, v)| format!("{:?} = {}", k, sol.value(*v)))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            None => {
                warn!("write_solution called before solve()");
                Ok(())
            }
        }
    }
}

impl CbcOpt {
    fn build_xps(&self) -> Xps {
        let mut xps = Xps::new();
        let Some(sol) = &self.solution else { return xps };
        for &(tc, idx, col) in &self.columns {
            for epoch in 0..self.epochs {
                if let Some(&v) = self.x.get(&(tc, idx, epoch)) {
                    xps.insert((tc, col, epoch), FlowVar::Decision(sol.value(v)));
                }
            }
        }
        xps
    }
}
