use indexmap::IndexSet;
use serde::Serialize;

use crate::node::NodeId;
use crate::topology::Topology;

use super::{PathResult, RoutingAlgorithm, StepRecord};

/// All-pairs shortest paths computed using the Floyd–Warshall algorithm.
#[derive(Default)]
pub struct FloydWarshall;

/// Distance and next hop matrices for every ordered pair of nodes.
#[derive(Clone, Debug, Serialize)]
pub struct AllPairsResult {
    nodes: IndexSet<String>,
    distances: Vec<Vec<f64>>,
    #[serde(skip)]
    next_hop: Vec<Vec<Option<NodeId>>>,
    /// Step trace.
    pub steps: Vec<StepRecord>,
}

impl AllPairsResult {
    /// Node names, matrix rows and columns follow this order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(|name| name.as_str())
    }

    /// Distance matrix.
    pub fn distance_matrix(&self) -> &[Vec<f64>] {
        &self.distances
    }

    /// Returns the shortest distance from `from` to `to` (infinite if unreachable).
    pub fn distance(&self, from: &str, to: &str) -> Option<f64> {
        let i = self.nodes.get_index_of(from)?;
        let j = self.nodes.get_index_of(to)?;
        Some(self.distances[i][j])
    }

    /// Returns the node following `from` on the shortest path to `to`.
    pub fn next_hop(&self, from: &str, to: &str) -> Option<&str> {
        let i = self.nodes.get_index_of(from)?;
        let j = self.nodes.get_index_of(to)?;
        self.next_hop[i][j].map(|hop| self.nodes[hop].as_str())
    }

    /// Reconstructs the path from `from` to `to` by following next hops.
    ///
    /// Returns `None` if some hop is undefined.
    pub fn path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let mut current = self.nodes.get_index_of(from)?;
        let target = self.nodes.get_index_of(to)?;
        let mut path = vec![self.nodes[current].clone()];
        while current != target {
            current = self.next_hop[current][target]?;
            path.push(self.nodes[current].clone());
            // next hops may loop if the topology contains negative links
            if path.len() > self.nodes.len() {
                return None;
            }
        }
        Some(path)
    }
}

impl FloydWarshall {
    /// Computes shortest paths between all pairs of nodes.
    pub fn all_pairs(&self, topology: &Topology) -> AllPairsResult {
        let node_count = topology.node_count();
        let mut distances = vec![vec![f64::INFINITY; node_count]; node_count];
        let mut next_hop: Vec<Vec<Option<NodeId>>> = vec![vec![None; node_count]; node_count];
        let mut steps = Vec::new();

        for node in 0..node_count {
            distances[node][node] = 0.0;
            for (neighbor, link) in topology.neighbors(node) {
                distances[node][neighbor] = link.weight;
                next_hop[node][neighbor] = Some(neighbor);
            }
        }

        for k in 0..node_count {
            for i in 0..node_count {
                for j in 0..node_count {
                    let distance = distances[i][k] + distances[k][j];
                    if distance < distances[i][j] {
                        distances[i][j] = distance;
                        next_hop[i][j] = next_hop[i][k];
                        steps.push(StepRecord::FloydUpdate {
                            from: topology.node_name(i).to_string(),
                            to: topology.node_name(j).to_string(),
                            via: topology.node_name(k).to_string(),
                            distance,
                        });
                    }
                }
            }
        }

        AllPairsResult {
            nodes: topology.node_names().map(|name| name.to_string()).collect(),
            distances,
            next_hop,
            steps,
        }
    }
}

impl RoutingAlgorithm for FloydWarshall {
    fn find_path(&self, topology: &Topology, src: &str, dst: &str) -> PathResult {
        if !topology.contains_node(src) || !topology.contains_node(dst) {
            return PathResult::not_found(topology);
        }
        let all_pairs = self.all_pairs(topology);
        let path = all_pairs.path(src, dst);
        let distances = all_pairs
            .nodes()
            .map(|node| (node.to_string(), all_pairs.distance(src, node).unwrap_or(f64::INFINITY)))
            .collect();
        PathResult {
            path,
            distances,
            steps: all_pairs.steps,
        }
    }
}
