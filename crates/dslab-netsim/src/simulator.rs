//! Discrete-time packet network simulator.

use indexmap::IndexMap;

use crate::config::SimulationConfig;
use crate::error::TopologyError;
use crate::events::SimEvent;
use crate::loader::parse_topology;
use crate::metrics::{average_latency, Metrics, MetricsReport};
use crate::node::{Node, NodeId};
use crate::packet::{Packet, PacketId, PacketStatus};
use crate::routing::{find_path, PathAlgorithm};
use crate::snapshot::{LinkUtilization, NetworkSnapshot, NodeSnapshot};
use crate::topology::Topology;
use crate::{log_debug, log_trace};

/// Packet network simulator advancing one time unit per [`step`](Self::step).
///
/// Owns the topology, the nodes with their packet queues, the list of all created packets and the metrics.
/// Topology is expected to be modified only while there are no packets in flight.
pub struct NetworkSimulator {
    name: String,
    config: SimulationConfig,
    topology: Topology,
    nodes: IndexMap<String, Node>,
    packets: Vec<Packet>,
    time: u64,
    metrics: Metrics,
}

impl NetworkSimulator {
    /// Creates an empty network with default config.
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Creates an empty network with the given config.
    pub fn with_config(config: SimulationConfig) -> Self {
        Self::from_topology(Topology::new(), config)
    }

    /// Creates a network from existing topology, giving every node the default buffer size.
    pub fn from_topology(topology: Topology, config: SimulationConfig) -> Self {
        let nodes = topology
            .node_names()
            .map(|name| (name.to_string(), Node::new(name, config.default_buffer_size)))
            .collect();
        Self {
            name: "net".to_string(),
            config,
            topology,
            nodes,
            packets: Vec::new(),
            time: 0,
            metrics: Metrics::default(),
        }
    }

    /// Replaces the whole network with the topology described by `text` (see [`crate::loader`]).
    ///
    /// On error the network is left untouched.
    pub fn load_topology(&mut self, text: &str) -> Result<(), TopologyError> {
        let topology = parse_topology(text, self.config.default_capacity)?;
        let name = std::mem::take(&mut self.name);
        *self = Self::from_topology(topology, self.config.clone());
        self.name = name;
        log_debug!(self, "loaded topology with {} nodes", self.nodes.len());
        Ok(())
    }

    /// Name used as the logging target.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current time.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Simulation config.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Network topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Sets the algorithm used to route new packets.
    pub fn set_routing(&mut self, routing: PathAlgorithm) {
        self.config.routing = routing;
    }

    // Topology --------------------------------------------------------------------------------------------------------

    /// Adds a node with the given buffer size. Returns `false` if the node already exists.
    pub fn add_node(&mut self, name: &str, buffer_size: usize) -> bool {
        if self.nodes.contains_key(name) {
            return false;
        }
        self.topology.add_node(name);
        self.nodes.insert(name.to_string(), Node::new(name, buffer_size));
        true
    }

    /// Adds a node with the default buffer size.
    pub fn add_node_default(&mut self, name: &str) -> bool {
        self.add_node(name, self.config.default_buffer_size)
    }

    /// Adds a link between two existing nodes, or updates the existing one.
    ///
    /// Returns `false` if any node is unknown or both names are equal.
    pub fn add_edge(&mut self, node1: &str, node2: &str, weight: f64, capacity: f64) -> bool {
        self.topology.add_link(node1, node2, weight, capacity).is_some()
    }

    /// Adds a link with the default weight and capacity.
    pub fn add_edge_default(&mut self, node1: &str, node2: &str) -> bool {
        self.add_edge(node1, node2, self.config.default_weight, self.config.default_capacity)
    }

    /// Changes the buffer size of the node. Returns `false` if there is no such node.
    ///
    /// Already resident packets are kept even if they no longer fit, and are dropped on the following steps
    /// if they can't move on.
    pub fn set_buffer_size(&mut self, name: &str, buffer_size: usize) -> bool {
        match self.nodes.get_mut(name) {
            Some(node) => {
                node.set_buffer_size(buffer_size);
                true
            }
            None => false,
        }
    }

    // Routing ---------------------------------------------------------------------------------------------------------

    /// Computes a path between two nodes with the given algorithm.
    ///
    /// Returns `None` if any node is unknown or there is no path between them.
    pub fn path(&self, src: &str, dst: &str, algorithm: PathAlgorithm) -> Option<Vec<String>> {
        let source = self.topology.node_id(src)?;
        let destination = self.topology.node_id(dst)?;
        if !self.topology.has_path(source, destination) {
            return None;
        }
        find_path(&self.topology, src, dst, algorithm).path
    }

    // Packets ---------------------------------------------------------------------------------------------------------

    /// Creates a packet at `src` destined to `dst` and routes it using the configured algorithm.
    ///
    /// Returns `None` if any node is unknown, the destination is unreachable or the source buffer is full.
    pub fn create_packet(&mut self, src: &str, dst: &str) -> Option<PacketId> {
        if !self.nodes.contains_key(dst) || !self.nodes.get(src).map_or(false, |node| node.can_accept()) {
            log_debug!(self, "can't create packet from {} to {}", src, dst);
            return None;
        }
        let path = match self.path(src, dst, self.config.routing) {
            Some(path) if !path.is_empty() => path,
            _ => {
                log_debug!(self, "no {} path from {} to {}", self.config.routing, src, dst);
                return None;
            }
        };

        let id = self.packets.len();
        let packet = Packet::new(id, src, dst, path, self.time);
        if !self.nodes.get_mut(src).map_or(false, |node| node.push(id)) {
            return None;
        }
        log_debug!(self, "created packet {} from {} to {} via {:?}", id, src, dst, packet.path());
        self.packets.push(packet);
        self.metrics.on_sent();
        Some(id)
    }

    /// Returns the packet with the given id.
    pub fn packet(&self, id: PacketId) -> Option<&Packet> {
        self.packets.get(id)
    }

    /// Returns all created packets, including delivered and dropped ones.
    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    /// Returns the node with the given name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Returns all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Checks whether any node holds a packet.
    pub fn has_queued_packets(&self) -> bool {
        self.nodes.values().any(|node| node.current_buffer() > 0)
    }

    // Simulation ------------------------------------------------------------------------------------------------------

    /// Advances the clock by one unit and moves every queued packet by at most one hop.
    ///
    /// For each node in insertion order and each packet queued there at the beginning of the step:
    /// - a packet at its destination is delivered;
    /// - otherwise it moves to the next hop of its route if that node has a free buffer slot;
    /// - otherwise the next hop is recorded as a congestion point, and the packet is dropped if the current
    ///   node holds more packets than its buffer size.
    ///
    /// Delivered, forwarded and dropped packets leave the queue of their node once all nodes are processed.
    pub fn step(&mut self) -> Vec<SimEvent> {
        self.time += 1;
        let time = self.time;
        let mut events = Vec::new();

        let queues: Vec<Vec<PacketId>> = self.nodes.values().map(|node| node.snapshot()).collect();
        let mut removed: Vec<Vec<PacketId>> = vec![Vec::new(); queues.len()];

        for (node_idx, queue) in queues.into_iter().enumerate() {
            let node_name = self.nodes[node_idx].name().to_string();
            for packet_id in queue {
                let packet = &mut self.packets[packet_id];
                if packet.is_at_destination() {
                    packet.mark_delivered(time);
                    self.metrics.on_delivered();
                    removed[node_idx].push(packet_id);
                    events.push(SimEvent::Delivery {
                        packet_id,
                        node: node_name.clone(),
                        time,
                    });
                    continue;
                }

                let next_hop = match packet.next_hop() {
                    Some(next_hop) => next_hop.to_string(),
                    None => {
                        // routes end at the destination, so this only guards against a packet off its route
                        packet.mark_dropped();
                        self.metrics.on_dropped();
                        removed[node_idx].push(packet_id);
                        events.push(SimEvent::Drop {
                            packet_id,
                            node: node_name.clone(),
                            time,
                        });
                        continue;
                    }
                };

                let accepted = self
                    .nodes
                    .get_mut(&next_hop)
                    .map_or(false, |next_node| next_node.push(packet_id));
                if accepted {
                    packet.move_to(&next_hop);
                    removed[node_idx].push(packet_id);
                    events.push(SimEvent::Forward {
                        packet_id,
                        from: node_name.clone(),
                        to: next_hop,
                        time,
                    });
                    continue;
                }

                self.metrics.on_congestion(&next_hop);
                let node = &self.nodes[node_idx];
                if node.current_buffer() > node.buffer_size() {
                    packet.mark_dropped();
                    self.metrics.on_dropped();
                    removed[node_idx].push(packet_id);
                    events.push(SimEvent::Drop {
                        packet_id,
                        node: node_name.clone(),
                        time,
                    });
                }
            }
        }

        for (node_idx, packet_ids) in removed.into_iter().enumerate() {
            let node = &mut self.nodes[node_idx];
            for packet_id in packet_ids {
                node.remove(packet_id);
            }
        }

        for event in &events {
            log_debug!(self, "{}", event);
        }
        log_trace!(
            self,
            "step finished with {} events, {} packets queued",
            events.len(),
            self.nodes.values().map(|node| node.current_buffer()).sum::<usize>()
        );
        events
    }

    /// Performs steps until no packets are queued or `max_steps` steps are made.
    pub fn step_until_idle(&mut self, max_steps: u64) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for _ in 0..max_steps {
            if !self.has_queued_packets() {
                break;
            }
            events.extend(self.step());
        }
        events
    }

    // Observation -----------------------------------------------------------------------------------------------------

    /// Returns the collected metrics with the average latency computed over delivered packets.
    pub fn metrics(&self) -> MetricsReport {
        MetricsReport {
            metrics: self.metrics.clone(),
            average_latency: average_latency(&self.packets),
        }
    }

    /// Counts in-transit packets whose route traverses each link (in any direction).
    pub fn link_utilization(&self) -> Vec<LinkUtilization> {
        let routes: Vec<Vec<NodeId>> = self
            .packets
            .iter()
            .filter(|packet| packet.status() == PacketStatus::InTransit)
            .map(|packet| packet.path().iter().filter_map(|name| self.topology.node_id(name)).collect())
            .collect();
        self.topology
            .links()
            .iter()
            .map(|link| {
                let packets = routes
                    .iter()
                    .filter(|route| route.windows(2).any(|hop| link.connects(hop[0], hop[1])))
                    .count();
                LinkUtilization {
                    node1: self.topology.node_name(link.node1).to_string(),
                    node2: self.topology.node_name(link.node2).to_string(),
                    packets,
                }
            })
            .collect()
    }

    /// Returns a serializable view of the whole network state.
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            time: self.time,
            nodes: self.nodes.values().map(NodeSnapshot::from).collect(),
            packets: self.packets.clone(),
            metrics: self.metrics(),
            links: self.link_utilization(),
        }
    }
}

impl Default for NetworkSimulator {
    fn default() -> Self {
        Self::new()
    }
}
