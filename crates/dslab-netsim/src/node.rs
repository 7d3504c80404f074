//! Network node.

use std::collections::VecDeque;

use serde::Serialize;

use crate::packet::PacketId;

/// Unique node id (position of the node in the topology).
pub type NodeId = usize;

/// A router holding a bounded queue of packets currently located at it.
#[derive(Clone, Debug, Serialize)]
pub struct Node {
    name: String,
    buffer_size: usize,
    queue: VecDeque<PacketId>,
}

impl Node {
    /// Creates an empty node which can hold up to `buffer_size` packets.
    pub fn new(name: &str, buffer_size: usize) -> Self {
        Self {
            name: name.to_string(),
            buffer_size,
            queue: VecDeque::new(),
        }
    }

    /// Node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum number of resident packets.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Number of resident packets.
    pub fn current_buffer(&self) -> usize {
        self.queue.len()
    }

    /// Resident packets in arrival order.
    pub fn queue(&self) -> impl Iterator<Item = PacketId> + '_ {
        self.queue.iter().copied()
    }

    /// Checks whether the node has room for one more packet.
    pub fn can_accept(&self) -> bool {
        self.current_buffer() < self.buffer_size
    }

    /// Appends the packet to the queue if there is room for it.
    pub fn push(&mut self, packet: PacketId) -> bool {
        if !self.can_accept() {
            return false;
        }
        self.queue.push_back(packet);
        true
    }

    /// Removes the packet from the queue.
    pub fn remove(&mut self, packet: PacketId) -> bool {
        match self.queue.iter().position(|id| *id == packet) {
            Some(pos) => self.queue.remove(pos).is_some(),
            None => false,
        }
    }

    pub(crate) fn set_buffer_size(&mut self, buffer_size: usize) {
        self.buffer_size = buffer_size;
    }

    pub(crate) fn snapshot(&self) -> Vec<PacketId> {
        self.queue.iter().copied().collect()
    }
}
