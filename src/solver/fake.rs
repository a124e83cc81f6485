//! A deterministic, scriptable [`Opt`]/[`Compose`] pair used by selector tests.
//!
//! `ScriptedComposer` never talks to an actual ILP backend; it evaluates caller-supplied
//! closures against the `Pptc` it is handed, which is exactly the view a real composer would
//! have at `compose_apps` time. This is what lets the selector tests be bitwise-deterministic
//! without requiring `coin_cbc` to be installed.

use std::path::Path as FsPath;
use std::time::Duration;

use super::{EpochComposition, Fairness, Opt, Xps};
use crate::config::NetworkConfig;
use crate::error::Result;
use crate::pptc::Pptc;
use crate::solver::Compose;
use crate::topology::Topology;
use crate::traffic_class::Application;

/// Builds a [`ScriptedOpt`] from caller-supplied objective and flow-variable closures.
pub struct ScriptedComposer {
    /// Computes the objective for a given (already-masked) `Pptc`.
    pub objective: Box<dyn Fn(&Pptc) -> f64>,
    /// Computes the flow-variable tensor for a given `Pptc`.
    pub xps: Box<dyn Fn(&Pptc) -> Xps>,
    /// Whether the scripted solver reports success, subject to any path-count cap.
    pub always_solved: bool,
}

impl ScriptedComposer {
    /// A composer whose objective is just the count of visible paths, and that never fails.
    pub fn counting() -> Self {
        Self {
            objective: Box::new(|pptc| pptc.tcs().map(|tc| pptc.num_paths(tc, false)).sum::<usize>() as f64),
            xps: Box::new(|_| Xps::new()),
            always_solved: true,
        }
    }
}

impl std::fmt::Debug for ScriptedComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedComposer").finish_non_exhaustive()
    }
}

impl Compose for ScriptedComposer {
    fn compose_apps(
        &self,
        _apps: &[Application],
        _topo: &Topology,
        _netcfg: &NetworkConfig,
        _fairness: Fairness,
        _epoch_mode: EpochComposition,
        pptc: &Pptc,
    ) -> Result<Box<dyn Opt>> {
        Ok(Box::new(ScriptedOpt {
            objective: (self.objective)(pptc),
            xps: (self.xps)(pptc),
            pptc: pptc.clone(),
            cap: None,
            solved: self.always_solved,
            always_solved: self.always_solved,
        }))
    }
}

/// A scripted, in-memory stand-in for a real [`Opt`].
#[derive(Debug)]
pub struct ScriptedOpt {
    objective: f64,
    xps: Xps,
    pptc: Pptc,
    cap: Option<usize>,
    solved: bool,
    always_solved: bool,
}

impl Opt for ScriptedOpt {
    fn cap_num_paths(&mut self, cap: usize) {
        self.cap = Some(cap);
    }

    fn solve(&mut self) -> Result<()> {
        let total: usize = self.pptc.tcs().map(|tc| self.pptc.num_paths(tc, false)).sum();
        self.solved = self.always_solved && self.cap.map_or(true, |c| total <= c);
        Ok(())
    }

    fn is_solved(&self) -> bool {
        self.solved
    }

    fn get_time(&self) -> Duration {
        Duration::from_millis(1)
    }

    fn get_solved_objective(&self) -> f64 {
        self.objective
    }

    fn get_chosen_paths(&self, _relaxed: bool) -> Pptc {
        self.pptc.clone()
    }

    fn get_xps(&self) -> &Xps {
        &self.xps
    }

    fn write(&self, _path: &FsPath) -> std::io::Result<()> {
        Ok(())
    }

    fn write_solution(&self, _path: &FsPath) -> std::io::Result<()> {
        Ok(())
    }
}
