//! Command-line smoke test: run one path-selection strategy against a topology fixture and print
//! the resulting masks. Exercised manually, not part of the library's public contract.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use ipnet::Ipv4Net;

use pathsel::config::NetworkConfig;
use pathsel::expel::ExpelMode;
use pathsel::path::Path as CandidatePath;
use pathsel::pptc::Pptc;
use pathsel::replace::ReplaceMode;
use pathsel::rng::Rng;
use pathsel::selectors::{self, SortMode};
use pathsel::solver::cbc::CbcComposer;
use pathsel::solver::{EpochComposition, Fairness};
use pathsel::topology::{NodeIndex, ResourceMap, Topology};
use pathsel::traffic_class::{Application, TrafficClass};

/// Which selector strategy to run.
#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum Strategy {
    /// [`selectors::choose_rand`].
    Random,
    /// [`selectors::k_shortest_paths`].
    KShortest,
    /// [`selectors::k_resource_paths`].
    KResource,
    /// [`selectors::select_ilp`].
    Ilp,
    /// [`selectors::select_iterative`].
    Iterative,
    /// [`selectors::select_sa`].
    Sa,
}

/// Run a path-selection strategy against a topology fixture and print the chosen masks.
#[derive(Debug, Parser)]
struct Args {
    /// Which selector to run.
    #[arg(long, value_enum, default_value = "k-shortest")]
    strategy: Strategy,
    /// Target number of visible paths per traffic class.
    #[arg(long, default_value_t = 2)]
    k: usize,
    /// JSON topology fixture path (`{"nodes": [...], "links": [...], "diameter": N}`); requires
    /// the `serde` feature. Falls back to a built-in 4-node line topology when omitted.
    #[arg(long)]
    topology: Option<PathBuf>,
    /// RNG seed, for the strategies that draw randomly.
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let topo = load_topology(args.topology.as_deref());
    let apps = vec![demo_application()];
    let netcfg = NetworkConfig::default();
    let mut rng = Rng::seeded(args.seed);
    let composer = CbcComposer;

    let masks: HashMap<u64, Vec<bool>> = match args.strategy {
        Strategy::Random => {
            let mut pptc = Pptc::from_apps(&apps);
            selectors::choose_rand(&mut pptc, args.k, &mut rng);
            dump(&pptc)
        }
        Strategy::KShortest => {
            let mut pptc = Pptc::from_apps(&apps);
            selectors::k_shortest_paths(&mut pptc, args.k);
            dump(&pptc)
        }
        Strategy::KResource => {
            let mut pptc = Pptc::from_apps(&apps);
            selectors::k_resource_paths(&mut pptc, args.k, &netcfg.default_weights, &topo);
            dump(&pptc)
        }
        Strategy::Ilp => {
            let selection = selectors::select_ilp(
                &apps,
                &topo,
                &netcfg,
                args.k,
                Fairness::Weighted,
                EpochComposition::Worst,
                &composer,
            )
            .expect("select_ilp failed");
            dump(&selection.chosen)
        }
        Strategy::Iterative => {
            let selection = selectors::select_iterative(
                &apps,
                &topo,
                &netcfg,
                20,
                0.01,
                Fairness::Weighted,
                EpochComposition::Worst,
                SortMode::Len,
                &composer,
            )
            .expect("select_iterative failed");
            dump(&selection.chosen)
        }
        Strategy::Sa => {
            let selection = selectors::select_sa(
                &apps,
                &topo,
                &netcfg,
                args.k,
                20,
                0.72,
                0.88,
                Fairness::Weighted,
                EpochComposition::Worst,
                ExpelMode::Random,
                ReplaceMode::NextSorted,
                &netcfg.default_weights,
                &mut rng,
                &composer,
            )
            .expect("select_sa failed");
            dump(&selection.chosen)
        }
    };

    for (tc, mask) in masks {
        println!("tc {tc}: {mask:?}");
    }
}

fn dump(pptc: &Pptc) -> HashMap<u64, Vec<bool>> {
    pptc.tcs().map(|tc| (tc, pptc.mask_of(tc).to_vec())).collect()
}

fn n(i: u32) -> pathsel::topology::NodeId {
    NodeIndex::new(i as usize)
}

fn builtin_topology() -> Topology {
    let nodes = vec![ResourceMap::default(); 4];
    let links = vec![
        (0, 1, ResourceMap::new([("bw".to_string(), 10.0)])),
        (1, 2, ResourceMap::new([("bw".to_string(), 10.0)])),
        (2, 3, ResourceMap::new([("bw".to_string(), 10.0)])),
        (0, 2, ResourceMap::new([("bw".to_string(), 5.0)])),
    ];
    Topology::new(nodes, links, 3)
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TopologyFixture {
    nodes: Vec<HashMap<String, f64>>,
    links: Vec<(usize, usize, HashMap<String, f64>)>,
    diameter: usize,
}

#[cfg(feature = "serde")]
fn load_topology_file(path: &std::path::Path) -> Topology {
    let data = std::fs::read_to_string(path).expect("failed to read topology fixture");
    let fixture: TopologyFixture = serde_json::from_str(&data).expect("invalid topology fixture");
    let nodes = fixture.nodes.into_iter().map(ResourceMap::new).collect();
    let links = fixture
        .links
        .into_iter()
        .map(|(src, dst, resources)| (src, dst, ResourceMap::new(resources)))
        .collect();
    Topology::new(nodes, links, fixture.diameter)
}

fn load_topology(_path: Option<&std::path::Path>) -> Topology {
    #[cfg(feature = "serde")]
    if let Some(path) = _path {
        return load_topology_file(path);
    }
    builtin_topology()
}

fn demo_application() -> Application {
    let tc = TrafficClass {
        id: 1,
        ingress: n(0),
        egress: n(3),
        priority: 0,
        vol_flows: vec![1.0, 1.0],
        src_prefix: Ipv4Net::from_str("10.0.0.0/24").unwrap(),
        dst_prefix: Ipv4Net::from_str("10.0.1.0/24").unwrap(),
    };
    let paths = vec![
        CandidatePath::Plain { nodes: vec![n(0), n(1), n(2), n(3)] },
        CandidatePath::Plain { nodes: vec![n(0), n(2), n(3)] },
        CandidatePath::Plain { nodes: vec![n(0), n(1), n(2), n(1), n(2), n(3)] },
    ];
    Application { name: "demo".into(), classes: vec![(tc, paths)] }
}
