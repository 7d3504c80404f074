use crate::node::NodeId;
use crate::topology::Topology;

use super::{distance_map, reconstruct_path, resolve_endpoints, PathResult, RoutingAlgorithm, StepRecord};

/// Bellman-Ford algorithm over undirected links.
///
/// Every link is relaxed in both directions, so any negative link reachable from the source shows up as a
/// negative cycle. After convergence a single extra scan over the link list looks for links which still admit
/// an improvement. The scan does not consider reachability from the source, which is a known limitation: links
/// in other components never trigger it, and nothing beyond the link list is checked.
#[derive(Default)]
pub struct BellmanFord;

impl RoutingAlgorithm for BellmanFord {
    fn find_path(&self, topology: &Topology, src: &str, dst: &str) -> PathResult {
        let (source, target) = match resolve_endpoints(topology, src, dst) {
            Some(endpoints) => endpoints,
            None => return PathResult::not_found(topology),
        };
        let node_count = topology.node_count();
        let mut distances = vec![f64::INFINITY; node_count];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; node_count];
        let mut steps = vec![StepRecord::Visit {
            node: src.to_string(),
            distance: 0.0,
        }];
        distances[source] = 0.0;

        for _ in 1..node_count {
            let mut updated = false;
            for link in topology.links() {
                for (from, to) in [(link.node1, link.node2), (link.node2, link.node1)] {
                    if distances[from] < f64::INFINITY && distances[from] + link.weight < distances[to] {
                        distances[to] = distances[from] + link.weight;
                        predecessors[to] = Some(from);
                        updated = true;
                        steps.push(StepRecord::Update {
                            node: topology.node_name(to).to_string(),
                            distance: distances[to],
                            predecessor: Some(topology.node_name(from).to_string()),
                        });
                    }
                }
            }
            if !updated {
                break;
            }
        }

        for link in topology.links() {
            let (u, v) = (link.node1, link.node2);
            if distances[u] + link.weight < distances[v] || distances[v] + link.weight < distances[u] {
                steps.push(StepRecord::NegativeCycle {
                    node1: topology.node_name(u).to_string(),
                    node2: topology.node_name(v).to_string(),
                });
                return PathResult {
                    path: None,
                    distances: distance_map(topology, &distances),
                    steps,
                };
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
