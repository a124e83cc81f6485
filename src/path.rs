//! Candidate end-to-end paths through a [`Topology`](crate::topology::Topology).

use crate::topology::{Entity, LinkId, NodeId, Topology};

/// A candidate end-to-end route, either a plain sequence of nodes or one additionally tagged
/// with the middleboxes it traverses.
#[derive(Debug, Clone, PartialEq)]
pub enum Path {
    /// Nodes and links only.
    Plain {
        /// Ordered node sequence from ingress to egress.
        nodes: Vec<NodeId>,
    },
    /// A path that additionally carries the middleboxes it is valid for.
    WithMiddleboxes {
        /// Ordered node sequence from ingress to egress.
        nodes: Vec<NodeId>,
        /// Middlebox nodes this path can be bucketed under, in traversal order.
        middleboxes: Vec<NodeId>,
    },
}

/// Capability trait abstracting over the two path variants, so callers do not need to match on
/// [`Path`] directly.
pub trait PathKind {
    /// Node sequence from ingress to egress.
    fn nodes(&self) -> &[NodeId];

    /// Middleboxes this path traverses, if it carries that information.
    fn middleboxes(&self) -> Option<&[NodeId]>;

    /// Node count of the path.
    fn length(&self) -> usize {
        self.nodes().len()
    }

    /// Links traversed by the path, in order, skipping any pair of consecutive nodes that is not
    /// actually adjacent in `topo`.
    fn links(&self, topo: &Topology) -> Vec<LinkId> {
        self.nodes()
            .windows(2)
            .filter_map(|w| topo.find_link(w[0], w[1]))
            .collect()
    }

    /// All entities (nodes and links) a path traverses, used by the scoring functions.
    fn entities(&self, topo: &Topology) -> Vec<Entity> {
        let mut out: Vec<Entity> = self.nodes().iter().copied().map(Entity::Node).collect();
        out.extend(self.links(topo).into_iter().map(Entity::Link));
        out
    }
}

impl PathKind for Path {
    fn nodes(&self) -> &[NodeId] {
        match self {
            Path::Plain { nodes } => nodes,
            Path::WithMiddleboxes { nodes, .. } => nodes,
        }
    }

    fn middleboxes(&self) -> Option<&[NodeId]> {
        match self {
            Path::Plain { .. } => None,
            Path::WithMiddleboxes { middleboxes, .. } => Some(middleboxes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{NodeIndex, ResourceMap, Topology};

    fn line4() -> Topology {
        let nodes = vec![ResourceMap::default(); 4];
        let links = vec![
            (0, 1, ResourceMap::default()),
            (1, 2, ResourceMap::default()),
            (2, 3, ResourceMap::default()),
        ];
        Topology::new(nodes, links, 3)
    }

    fn n(i: u32) -> NodeIndex<u32> {
        NodeIndex::new(i as usize)
    }

    #[test]
    fn plain_path_length_and_links() {
        let topo = line4();
        let p = Path::Plain {
            nodes: vec![n(0), n(1), n(2), n(3)],
        };
        assert_eq!(p.length(), 4);
        assert_eq!(p.links(&topo).len(), 3);
        assert!(p.middleboxes().is_none());
    }

    #[test]
    fn middlebox_path_exposes_boxes() {
        let p = Path::WithMiddleboxes {
            nodes: vec![n(0), n(1), n(2)],
            middleboxes: vec![n(1)],
        };
        assert_eq!(p.middleboxes(), Some(&[n(1)][..]));
    }
}
