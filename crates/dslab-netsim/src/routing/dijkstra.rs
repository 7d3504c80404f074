use crate::node::NodeId;
use crate::topology::Topology;

use super::{distance_map, reconstruct_path, resolve_endpoints, PathResult, RoutingAlgorithm, StepRecord};

/// Dijkstra's algorithm with a linear scan for the closest unvisited node.
///
/// Correct for non-negative link weights only. Among equally distant nodes the one added to the topology
/// first is visited first. The search stops as soon as the target is visited.
///
/// Nodes unreachable from the source are never visited: the trace has no `Visit` records with infinite
/// distance, and their distances stay infinite.
#[derive(Default)]
pub struct Dijkstra;

impl RoutingAlgorithm for Dijkstra {
    fn find_path(&self, topology: &Topology, src: &str, dst: &str) -> PathResult {
        let (source, target) = match resolve_endpoints(topology, src, dst) {
            Some(endpoints) => endpoints,
            None => return PathResult::not_found(topology),
        };
        let node_count = topology.node_count();
        let mut distances = vec![f64::INFINITY; node_count];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; node_count];
        let mut visited = vec![false; node_count];
        let mut steps = Vec::new();
        distances[source] = 0.0;

        loop {
            let mut closest: Option<NodeId> = None;
            for node in 0..node_count {
                if !visited[node] && closest.map_or(true, |c| distances[node] < distances[c]) {
                    closest = Some(node);
                }
            }
            // remaining nodes are unreachable
            let current = match closest {
                Some(node) if distances[node] < f64::INFINITY => node,
                _ => break,
            };
            steps.push(StepRecord::Visit {
                node: topology.node_name(current).to_string(),
                distance: distances[current],
            });
            if current == target {
                break;
            }
            visited[current] = true;

            for (neighbor, link) in topology.neighbors(current) {
                if visited[neighbor] {
                    continue;
                }
                let distance = distances[current] + link.weight;
                if distance < distances[neighbor] {
                    distances[neighbor] = distance;
                    predecessors[neighbor] = Some(current);
                    steps.push(StepRecord::Update {
                        node: topology.node_name(neighbor).to_string(),
                        distance,
                        predecessor: Some(topology.node_name(current).to_string()),
                    });
                }
            }
        }

        let path = if distances[target] < f64::INFINITY {
            reconstruct_path(topology, &predecessors, source, target)
        } else {
            None
        };
        PathResult {
            path,
            distances: distance_map(topology, &distances),
            steps,
        }
    }
}
