//! k-resource-weighted path selection.

use std::collections::HashMap;

use crate::pptc::Pptc;
use crate::scoring::resource_order;
use crate::topology::Topology;
use crate::traffic_class::TcId;

/// As [`crate::selectors::k_shortest_paths`], but ordering candidates by descending
/// [`crate::scoring::resource_score`] instead of ascending length.
pub fn k_resource_paths(
    pptc: &mut Pptc,
    k: usize,
    weights: &HashMap<String, f64>,
    topo: &Topology,
) -> HashMap<TcId, Vec<usize>> {
    let mut orders = HashMap::new();
    for tc in pptc.tcs().collect::<Vec<_>>() {
        let order = resource_order(pptc.all_paths(tc), topo, weights);
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
