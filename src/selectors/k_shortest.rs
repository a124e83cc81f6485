//! k-shortest path selection.

use std::collections::HashMap;

use crate::pptc::Pptc;
use crate::scoring::length_order;
use crate::traffic_class::TcId;

/// For each traffic class, mask every path, then unmask the first `min(k, n)` indices in
/// ascending-length order. Returns each traffic class's length order, so a caller can reuse it
/// for incremental growth (as [`crate::selectors::select_iterative`] does).
pub fn k_shortest_paths(pptc: &mut Pptc, k: usize) -> HashMap<TcId, Vec<usize>> {
    let mut orders = HashMap::new();
    for tc in pptc.tcs().collect::<Vec<_>>() {
        let order = length_order(pptc.all_paths(tc));
        let n = order.len();
        let mut mask = vec![true; n];
        for &idx in order.iter().take(k.min(n)) {
            mask[idx] = false;
        }
        let _ = pptc.mask(tc, mask);
        orders.insert(tc, order);
    }
    orders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use crate::topology::NodeIndex;
    use crate::traffic_class::{Application, TrafficClass};
    use ipnet::Ipv4Net;
    use std::str::FromStr;

    fn n(i: u32) -> crate::topology::NodeId {
        NodeIndex::new(i as usize)
    }

    fn plain(len: usize) -> Path {
        Path::Plain { nodes: (0..len as u32).map(n).collect() }
    }

    fn app(tc_id: TcId, lens: &[usize]) -> Application {
        let tc = TrafficClass {
            id: tc_id,
            ingress: n(0),
            egress: n(1),
            priority: 0,
            vol_flows: vec![1.0],
            src_prefix: Ipv4Net::from_str("10.0.0.0/24").unwrap(),
            dst_prefix: Ipv4Net::from_str("10.0.1.0/24").unwrap(),
        };
        Application { name: "app".into(), classes: vec![(tc, lens.iter().map(|&l| plain(l)).collect())] }
    }

    #[test]
    fn scenario_line4_three_paths_k2() {
        // Topology: 4-node line, one TC with 3 candidate paths of lengths {4, 5, 6}.
        let apps = vec![app(1, &[4, 5, 6])];
        let mut pptc = Pptc::from_apps(&apps);
        k_shortest_paths(&mut pptc, 2);
        assert_eq!(pptc.mask_of(1), &[false, false, true]);
    }

    #[test]
    fn two_tcs_different_totals() {
        let apps = vec![app(1, &[1, 2, 3, 4, 5]), app(2, &[1, 2, 3])];
        let mut pptc = Pptc::from_apps(&apps);
        k_shortest_paths(&mut pptc, 4);
        assert_eq!(pptc.num_paths(1, false), 4);
        assert_eq!(pptc.num_paths(2, false), 3);
    }
}
