use std::cmp::{Ordering, Reverse};

use priority_queue::PriorityQueue;
use rustc_hash::FxHashSet;

use crate::node::NodeId;
use crate::topology::Topology;

use super::{distance_map, reconstruct_path, resolve_endpoints, PathResult, RoutingAlgorithm, StepRecord};

#[derive(Copy, Clone, Debug, PartialEq)]
struct Distance(f64);

impl Eq for Distance {}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Generic weighted shortest path using a priority queue.
///
/// Used when no specific algorithm is requested. Requires non-negative link weights.
#[derive(Default)]
pub struct ShortestPath;

impl RoutingAlgorithm for ShortestPath {
    fn find_path(&self, topology: &Topology, src: &str, dst: &str) -> PathResult {
        let (source, target) = match resolve_endpoints(topology, src, dst) {
            Some(endpoints) => endpoints,
            None => return PathResult::not_found(topology),
        };
        let node_count = topology.node_count();
        let mut distances = vec![f64::INFINITY; node_count];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; node_count];
        let mut settled: FxHashSet<NodeId> = FxHashSet::default();
        let mut steps = Vec::new();
        let mut queue = PriorityQueue::new();
        distances[source] = 0.0;
        queue.push(source, Reverse(Distance(0.0)));

        while let Some((current, Reverse(Distance(distance)))) = queue.pop() {
            settled.insert(current);
            steps.push(StepRecord::Visit {
                node: topology.node_name(current).to_string(),
                distance,
            });
            if current == target {
                break;
            }
            for (neighbor, link) in topology.neighbors(current) {
                if settled.contains(&neighbor) {
                    continue;
                }
                let new_distance = distance + link.weight;
                if new_distance < distances[neighbor] {
                    distances[neighbor] = new_distance;
                    predecessors[neighbor] = Some(current);
                    // updates the priority if the node is already queued
                    queue.push(neighbor, Reverse(Distance(new_distance)));
                    steps.push(StepRecord::Update {
                        node: topology.node_name(neighbor).to_string(),
                        distance: new_distance,
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
