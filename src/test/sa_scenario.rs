//! Scenario: SA on a 2-TC problem where the objective only ever worsens as paths lengthen, so
//! hill-climbing must reject every mutation and the final masks equal the phase-0 k-shortest seed.

use std::collections::HashMap;

use crate::config::NetworkConfig;
use crate::expel::ExpelMode;
use crate::path::PathKind;
use crate::pptc::Pptc;
use crate::replace::ReplaceMode;
use crate::rng::Rng;
use crate::selectors::{k_shortest_paths, select_sa};
use crate::solver::fake::ScriptedComposer;
use crate::solver::{EpochComposition, Fairness};

use super::fixtures::{line4, two_tc_application};

#[test]
fn sa_hill_climbing_keeps_the_kshortest_seed_when_shorter_is_always_better() {
    let topo = line4();
    let apps = vec![two_tc_application()];
    let netcfg = NetworkConfig::default();
    let weights = HashMap::new();
    let mut rng = Rng::seeded(3);

    // Objective rewards shorter total visible path length, so the k-shortest seed is already
    // optimal: any expel/replace mutation can only pull in longer paths and strictly lower it.
    let composer = ScriptedComposer {
        objective: Box::new(|pptc: &Pptc| {
            let mut total = 0.0;
            for tc in pptc.tcs() {
                let paths = pptc.all_paths(tc);
                for idx in pptc.visible_indices(tc) {
                    total -= paths[idx].length() as f64;
                }
            }
            total
        }),
        xps: Box::new(|_| Default::default()),
        always_solved: true,
    };

    let k = 2;
    let result = select_sa(
        &apps,
        &topo,
        &netcfg,
        k,
        5,
        0.72,
        0.88,
        Fairness::Weighted,
        EpochComposition::Worst,
        ExpelMode::NoFlow,
        ReplaceMode::NextSorted,
        &weights,
        &mut rng,
        &composer,
    )
    .unwrap();

    let mut expected = Pptc::from_apps(&apps);
    k_shortest_paths(&mut expected, k);

    for tc in expected.tcs() {
        assert_eq!(
            result.chosen.mask_of(tc),
            expected.mask_of(tc),
            "tc {tc}: hill-climbing should have rejected every worse mutation"
        );
    }
}
