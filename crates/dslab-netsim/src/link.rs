//! Network link.

use serde::Serialize;

use crate::node::NodeId;

/// Unique link id.
pub type LinkId = usize;

/// An undirected link between two nodes in the network.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Link {
    /// First endpoint (in the order the link was added).
    pub node1: NodeId,
    /// Second endpoint.
    pub node2: NodeId,
    /// Link weight used by the routing algorithms. May be zero or negative.
    pub weight: f64,
    /// Link capacity. Advisory only, packet forwarding does not consult it.
    pub capacity: f64,
}

impl Link {
    /// Creates a new link between `node1` and `node2`.
    pub fn new(node1: NodeId, node2: NodeId, weight: f64, capacity: f64) -> Self {
        Self {
            node1,
            node2,
            weight,
            capacity,
        }
    }

    /// Checks whether the link connects `a` and `b` (in any direction).
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.node1 == a && self.node2 == b) || (self.node1 == b && self.node2 == a)
    }
}
