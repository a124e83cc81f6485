//! Read-only topology snapshot: per-node and per-link resource maps, and a precomputed diameter.
//!
//! Graph *construction* (link weights, shortest paths, the diameter itself) is treated as an
//! external collaborator's job; this module only stores the result and answers the small set of
//! queries the scoring functions need.

use std::collections::HashMap;

use petgraph::graph::DiGraph;
pub use petgraph::graph::{EdgeIndex, NodeIndex};

/// Node identifier, doubling as the index into the underlying graph.
pub type NodeId = NodeIndex<u32>;
/// Link identifier, doubling as the index into the underlying graph.
pub type LinkId = EdgeIndex<u32>;
/// Name of a capacity resource (e.g. `"bw"`, `"cpu"`).
pub type Resource = String;

/// A bag of named, non-negative resource capacities attached to a node or a link.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceMap(HashMap<Resource, f64>);

impl ResourceMap {
    /// Build a resource map from an iterator of `(name, capacity)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (Resource, f64)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Capacity for `resource`, or `0.0` if the resource is not present.
    pub fn get(&self, resource: &str) -> f64 {
        self.0.get(resource).copied().unwrap_or(0.0)
    }
}

/// Which kind of topology entity a resource query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A node.
    Node(NodeId),
    /// A link.
    Link(LinkId),
}

/// A directed network topology: nodes and links, each carrying a [`ResourceMap`], plus a
/// precomputed diameter.
#[derive(Debug, Clone)]
pub struct Topology {
    graph: DiGraph<ResourceMap, ResourceMap, u32>,
    diameter: usize,
    totals: HashMap<Resource, f64>,
}

impl Topology {
    /// Build a topology from its nodes, links, and a precomputed diameter.
    ///
    /// `links` is a list of `(src, dst, resources)`; both endpoints must already have been added
    /// via `nodes`.
    pub fn new(
        nodes: Vec<ResourceMap>,
        links: Vec<(usize, usize, ResourceMap)>,
        diameter: usize,
    ) -> Self {
        let mut graph = DiGraph::default();
        let node_ids: Vec<NodeId> = nodes.into_iter().map(|r| graph.add_node(r)).collect();
        for (src, dst, resources) in links {
            graph.add_edge(node_ids[src], node_ids[dst], resources);
        }
        let totals = Self::compute_totals(&graph);
        Self {
            graph,
            diameter,
            totals,
        }
    }

    fn compute_totals(graph: &DiGraph<ResourceMap, ResourceMap, u32>) -> HashMap<Resource, f64> {
        let mut totals: HashMap<Resource, f64> = HashMap::new();
        for weight in graph.node_weights().chain(graph.edge_weights()) {
            for (name, cap) in weight.0.iter() {
                *totals.entry(name.clone()).or_insert(0.0) += cap;
            }
        }
        totals
    }

    /// Resource map carried by a node or a link.
    pub fn resources(&self, entity: Entity) -> &ResourceMap {
        match entity {
            Entity::Node(n) => &self.graph[n],
            Entity::Link(l) => &self.graph[l],
        }
    }

    /// Capacity of `resource` summed across every node and link in the topology.
    pub fn total_resource(&self, resource: &str) -> f64 {
        self.totals.get(resource).copied().unwrap_or(0.0)
    }

    /// Longest shortest-path distance over all node pairs, as supplied at construction.
    pub fn diameter(&self) -> usize {
        self.diameter
    }

    /// Number of nodes in the topology.
    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// The link between two adjacent nodes, if one exists.
    pub fn find_link(&self, src: NodeId, dst: NodeId) -> Option<LinkId> {
        self.graph.find_edge(src, dst)
    }

    /// Node identifier for the `i`-th node added to the topology.
    pub fn node(&self, i: usize) -> NodeId {
        NodeId::new(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line4() -> Topology {
        // 0 -> 1 -> 2 -> 3, uniform bandwidth of 10 on every link.
        let nodes = vec![ResourceMap::default(); 4];
        let links = vec![
            (0, 1, ResourceMap::new([("bw".to_string(), 10.0)])),
            (1, 2, ResourceMap::new([("bw".to_string(), 10.0)])),
            (2, 3, ResourceMap::new([("bw".to_string(), 10.0)])),
        ];
        Topology::new(nodes, links, 3)
    }

    #[test]
    fn total_resource_sums_links() {
        let topo = line4();
        assert_eq!(topo.total_resource("bw"), 30.0);
        assert_eq!(topo.total_resource("missing"), 0.0);
    }

    #[test]
    fn diameter_and_node_count() {
        let topo = line4();
        assert_eq!(topo.diameter(), 3);
        assert_eq!(topo.num_nodes(), 4);
    }

    #[test]
    fn find_link_resolves_adjacency() {
        let topo = line4();
        assert!(topo.find_link(topo.node(0), topo.node(1)).is_some());
        assert!(topo.find_link(topo.node(0), topo.node(3)).is_none());
    }
}
