//! Simulation metrics.

use indexmap::IndexSet;
use serde::Serialize;

use crate::packet::{Packet, PacketStatus};

/// Counters collected during a simulation run.
#[derive(Serialize, Clone, Default, Debug)]
pub struct Metrics {
    /// Number of successfully created packets.
    pub packets_sent: u64,
    /// Number of delivered packets.
    pub packets_delivered: u64,
    /// Number of dropped packets.
    pub packets_dropped: u64,
    /// Nodes which rejected an incoming packet at least once, in the order of first rejection.
    pub congestion_points: IndexSet<String>,
}

impl Metrics {
    pub(crate) fn on_sent(&mut self) {
        self.packets_sent += 1;
    }

    pub(crate) fn on_delivered(&mut self) {
        self.packets_delivered += 1;
    }

    pub(crate) fn on_dropped(&mut self) {
        self.packets_dropped += 1;
    }

    pub(crate) fn on_congestion(&mut self, node: &str) {
        if !self.congestion_points.contains(node) {
            self.congestion_points.insert(node.to_string());
        }
    }
}

/// Metrics view including values derived from the packet list.
#[derive(Serialize, Clone, Debug)]
pub struct MetricsReport {
    /// Collected counters.
    #[serde(flatten)]
    pub metrics: Metrics,
    /// Mean latency of delivered packets (zero if nothing was delivered).
    pub average_latency: f64,
}

/// Computes the mean `delivery_time - creation_time` over delivered packets.
///
/// Packets in any other state are ignored. Returns zero if there are no delivered packets.
pub fn average_latency(packets: &[Packet]) -> f64 {
    let latencies: Vec<u64> = packets
        .iter()
        .filter(|packet| packet.status() == PacketStatus::Delivered)
        .filter_map(|packet| packet.latency())
        .collect();
    if latencies.is_empty() {
        return 0.;
    }
    latencies.iter().sum::<u64>() as f64 / latencies.len() as f64
}
