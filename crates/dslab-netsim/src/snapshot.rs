//! Read-only views of the simulator state.

use serde::Serialize;

use crate::metrics::MetricsReport;
use crate::node::Node;
use crate::packet::{Packet, PacketId};

/// State of a single node.
#[derive(Clone, Debug, Serialize)]
pub struct NodeSnapshot {
    /// Node name.
    pub name: String,
    /// Maximum number of resident packets.
    pub buffer_size: usize,
    /// Number of resident packets.
    pub current_buffer: usize,
    /// Resident packets in arrival order.
    pub queue: Vec<PacketId>,
}

impl From<&Node> for NodeSnapshot {
    fn from(node: &Node) -> Self {
        Self {
            name: node.name().to_string(),
            buffer_size: node.buffer_size(),
            current_buffer: node.current_buffer(),
            queue: node.queue().collect(),
        }
    }
}

/// Number of in-transit packets whose route traverses a link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LinkUtilization {
    /// First endpoint.
    pub node1: String,
    /// Second endpoint.
    pub node2: String,
    /// Number of packets.
    pub packets: usize,
}

/// State of the whole simulated network at some moment.
#[derive(Clone, Debug, Serialize)]
pub struct NetworkSnapshot {
    /// Current time.
    pub time: u64,
    /// Nodes in insertion order.
    pub nodes: Vec<NodeSnapshot>,
    /// All packets ever created, including finished ones.
    pub packets: Vec<Packet>,
    /// Current metrics.
    pub metrics: MetricsReport,
    /// Link utilization.
    pub links: Vec<LinkUtilization>,
}
