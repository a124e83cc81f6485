//! Pure path-scoring functions shared by the k-shortest, k-resource, and SA replace selectors.

use std::collections::HashMap;

use ordered_float::OrderedFloat;

use crate::path::{Path, PathKind};
use crate::topology::Topology;

/// Order candidate indices by ascending path length (node count), ties broken by original index.
pub fn length_order(paths: &[Path]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..paths.len()).collect();
    order.sort_by_key(|&i| (paths[i].length(), i));
    order
}

/// Resource-weighted score for a single path: the weighted sum, over every resource in `weights`,
/// of the path's peak normalized utilization of that resource, minus the path's length over the
/// topology diameter.
///
/// `score(p) = sum_r (max_{n in p} topo.resources(n).get(r) / total_resource(r)) * weights[r]
///             - len(p) / diameter`
pub fn resource_score(path: &Path, topo: &Topology, weights: &HashMap<String, f64>) -> f64 {
    let entities = path.entities(topo);
    let mut score = 0.0;
    for (resource, weight) in weights {
        let total = topo.total_resource(resource);
        let peak = entities
            .iter()
            .map(|&e| topo.resources(e).get(resource))
            .fold(0.0_f64, f64::max);
        let normalized = if total > 0.0 { peak / total } else { 0.0 };
        score += normalized * weight;
    }
    let diameter = topo.diameter().max(1) as f64;
    score - (path.length() as f64) / diameter
}

/// Order candidate indices by descending [`resource_score`], ties broken by original index.
pub fn resource_order(paths: &[Path], topo: &Topology, weights: &HashMap<String, f64>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..paths.len()).collect();
    order.sort_by_key(|&i| (std::cmp::Reverse(OrderedFloat(resource_score(&paths[i], topo, weights))), i));
    order
}

/// `path_score`, used once by the SA `PathScore` replace mode: the weighted sum over resources of
/// the path's *minimum* capacity along its nodes, plus a synthetic `len` resource contribution.
pub fn path_score(path: &Path, topo: &Topology, weights: &HashMap<String, f64>) -> f64 {
    let mut score = 0.0;
    for (resource, weight) in weights {
        if resource == "len" {
            score += weight * path.length() as f64;
            continue;
        }
        let min = path
            .nodes()
            .iter()
            .map(|&n| topo.resources(crate::topology::Entity::Node(n)).get(resource))
            .fold(f64::INFINITY, f64::min);
        let min = if min.is_finite() { min } else { 0.0 };
        score += weight * min;
    }
    score
}

/// Order candidate indices by descending [`path_score`], ties broken by original index.
pub fn path_score_order(paths: &[Path], topo: &Topology, weights: &HashMap<String, f64>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..paths.len()).collect();
    order.sort_by_key(|&i| (std::cmp::Reverse(OrderedFloat(path_score(&paths[i], topo, weights))), i));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{NodeIndex, ResourceMap};
    use maplit::hashmap;

    fn n(i: u32) -> crate::topology::NodeId {
        NodeIndex::new(i as usize)
    }

    fn plain(nodes: &[u32]) -> Path {
        Path::Plain {
            nodes: nodes.iter().copied().map(n).collect(),
        }
    }

    #[test]
    fn length_order_breaks_ties_by_index() {
        let paths = vec![plain(&[0, 1, 2]), plain(&[0, 1]), plain(&[0, 1, 2, 3])];
        assert_eq!(length_order(&paths), vec![1, 0, 2]);
    }

    #[test]
    fn resource_score_invariant_under_rescale() {
        let nodes = vec![
            ResourceMap::new([("bw".to_string(), 5.0)]),
            ResourceMap::new([("bw".to_string(), 1.0)]),
        ];
        let topo_a = Topology::new(nodes.clone(), vec![], 4);
        let scale = 3.0;
        let scaled_nodes: Vec<_> = nodes
            .iter()
            .map(|r| ResourceMap::new([("bw".to_string(), r.get("bw") * scale)]))
            .collect();
        let topo_b = Topology::new(scaled_nodes, vec![], 4);

        let path = plain(&[0, 1]);
        let weights = hashmap! { "bw".to_string() => 1.0 };
        let a = resource_score(&path, &topo_a, &weights);
        let b = resource_score(&path, &topo_b, &weights);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn resource_order_prefers_higher_capacity() {
        let nodes = vec![
            ResourceMap::new([("bw".to_string(), 1.0)]),
            ResourceMap::new([("bw".to_string(), 9.0)]),
        ];
        let topo = Topology::new(nodes, vec![], 2);
        let paths = vec![plain(&[0]), plain(&[1])];
        let weights = hashmap! { "bw".to_string() => 1.0 };
        assert_eq!(resource_order(&paths, &topo, &weights), vec![1, 0]);
    }
}
