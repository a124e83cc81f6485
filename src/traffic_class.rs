//! Traffic classes and the applications that group them.

use ipnet::Ipv4Net;

use crate::path::Path;
use crate::topology::NodeId;

/// Traffic-class identifier, unique within one selection run.
pub type TcId = u64;

/// An aggregate of flows with a common ingress, egress, priority, and per-epoch volume profile.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficClass {
    /// Identifier, unique within a selection run.
    pub id: TcId,
    /// Ingress node.
    pub ingress: NodeId,
    /// Egress node.
    pub egress: NodeId,
    /// Scheduling priority; higher means more important.
    pub priority: u32,
    /// Per-epoch traffic volume. May be overwritten by [`crate::clustering::cluster_tcs`].
    pub vol_flows: Vec<f64>,
    /// Source IP prefix.
    pub src_prefix: Ipv4Net,
    /// Destination IP prefix.
    pub dst_prefix: Ipv4Net,
}

impl TrafficClass {
    /// Number of epochs this traffic class carries a volume for.
    pub fn num_epochs(&self) -> usize {
        self.vol_flows.len()
    }
}

/// A named collection of traffic classes, each with its candidate path set — the unit the
/// external solver composes over.
#[derive(Debug, Clone)]
pub struct Application {
    /// Application name, used only for diagnostics.
    pub name: String,
    /// Traffic classes and their candidate paths.
    pub classes: Vec<(TrafficClass, Vec<Path>)>,
}

impl Application {
    /// Iterate over `(tc id, candidate paths)` for every traffic class in this application.
    pub fn tc_paths(&self) -> impl Iterator<Item = (TcId, &[Path])> {
        self.classes.iter().map(|(tc, paths)| (tc.id, paths.as_slice()))
    }
}
