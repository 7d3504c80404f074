//! Simulation events.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::packet::PacketId;

/// Something that happened to a packet during a simulation step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    /// Packet reached its destination.
    Delivery {
        /// Packet id.
        packet_id: PacketId,
        /// Destination node.
        node: String,
        /// Step time.
        time: u64,
    },
    /// Packet moved to the next hop.
    Forward {
        /// Packet id.
        packet_id: PacketId,
        /// Node the packet left.
        from: String,
        /// Node the packet arrived at.
        to: String,
        /// Step time.
        time: u64,
    },
    /// Packet was dropped.
    Drop {
        /// Packet id.
        packet_id: PacketId,
        /// Node the packet was dropped at.
        node: String,
        /// Step time.
        time: u64,
    },
}

impl SimEvent {
    /// Event time.
    pub fn time(&self) -> u64 {
        match self {
            SimEvent::Delivery { time, .. } | SimEvent::Forward { time, .. } | SimEvent::Drop { time, .. } => *time,
        }
    }

    /// Id of the packet concerned.
    pub fn packet_id(&self) -> PacketId {
        match self {
            SimEvent::Delivery { packet_id, .. }
            | SimEvent::Forward { packet_id, .. }
            | SimEvent::Drop { packet_id, .. } => *packet_id,
        }
    }
}

impl Display for SimEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SimEvent::Delivery { packet_id, node, .. } => write!(f, "packet {packet_id} delivered at {node}"),
            SimEvent::Forward {
                packet_id, from, to, ..
            } => write!(f, "packet {packet_id} forwarded from {from} to {to}"),
            SimEvent::Drop { packet_id, node, .. } => write!(f, "packet {packet_id} dropped at {node}"),
        }
    }
}
