//! Packet.

use serde::Serialize;

/// Unique packet id, assigned sequentially starting from zero.
pub type PacketId = usize;

/// Packet lifecycle status.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PacketStatus {
    /// Packet is created but has no route yet.
    Created,
    /// Packet has a route and is queued at some node.
    InTransit,
    /// Packet reached its destination.
    Delivered,
    /// Packet was dropped due to buffer overflow.
    Dropped,
}

/// A single message travelling through the network along a route fixed at creation.
#[derive(Clone, Debug, Serialize)]
pub struct Packet {
    id: PacketId,
    source: String,
    destination: String,
    status: PacketStatus,
    current_node: String,
    path: Vec<String>,
    creation_time: u64,
    delivery_time: Option<u64>,
}

impl Packet {
    /// Creates a packet located at its source with the given route.
    ///
    /// A non-empty route moves the packet straight to [`PacketStatus::InTransit`].
    pub(crate) fn new(id: PacketId, source: &str, destination: &str, path: Vec<String>, creation_time: u64) -> Self {
        let status = if path.is_empty() {
            PacketStatus::Created
        } else {
            PacketStatus::InTransit
        };
        Self {
            id,
            source: source.to_string(),
            destination: destination.to_string(),
            status,
            current_node: source.to_string(),
            path,
            creation_time,
            delivery_time: None,
        }
    }

    /// Packet id.
    pub fn id(&self) -> PacketId {
        self.id
    }

    /// Source node name.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Destination node name.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Current status.
    pub fn status(&self) -> PacketStatus {
        self.status
    }

    /// Name of the node the packet is currently located at.
    pub fn current_node(&self) -> &str {
        &self.current_node
    }

    /// Route from source to destination.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Time when the packet was created.
    pub fn creation_time(&self) -> u64 {
        self.creation_time
    }

    /// Time when the packet was delivered.
    pub fn delivery_time(&self) -> Option<u64> {
        self.delivery_time
    }

    /// Time spent in the network by a delivered packet.
    pub fn latency(&self) -> Option<u64> {
        self.delivery_time.map(|time| time - self.creation_time)
    }

    /// Checks whether the packet is at its destination.
    pub fn is_at_destination(&self) -> bool {
        self.current_node == self.destination
    }

    /// Returns the node following the current one on the route.
    pub fn next_hop(&self) -> Option<&str> {
        let pos = self.path.iter().position(|node| *node == self.current_node)?;
        self.path.get(pos + 1).map(|node| node.as_str())
    }

    pub(crate) fn move_to(&mut self, node: &str) {
        self.current_node = node.to_string();
    }

    pub(crate) fn mark_delivered(&mut self, time: u64) {
        self.status = PacketStatus::Delivered;
        self.delivery_time = Some(time);
    }

    pub(crate) fn mark_dropped(&mut self) {
        self.status = PacketStatus::Dropped;
    }
}
