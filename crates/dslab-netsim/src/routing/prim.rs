use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::node::NodeId;
use crate::topology::Topology;

use super::{SpanningTree, SpanningTreeAlgorithm};

// Frontier ------------------------------------------------------------------------------------------------------------

struct FrontierEdge {
    weight: f64,
    seq: usize,
    from: NodeId,
    to: NodeId,
}

impl Ord for FrontierEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed because BinaryHeap extracts the maximum element and we need the lightest edge,
        // edges of equal weight are taken in the order they entered the frontier
        other.weight.total_cmp(&self.weight).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEdge {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for FrontierEdge {}

#[derive(Default)]
struct Frontier {
    heap: BinaryHeap<FrontierEdge>,
    seq: usize,
}

impl Frontier {
    fn extend(&mut self, topology: &Topology, from: NodeId, visited: &[bool]) {
        for (to, link) in topology.neighbors(from) {
            if !visited[to] {
                self.heap.push(FrontierEdge {
                    weight: link.weight,
                    seq: self.seq,
                    from,
                    to,
                });
                self.seq += 1;
            }
        }
    }

    fn pop(&mut self) -> Option<FrontierEdge> {
        self.heap.pop()
    }
}

// Algorithm -----------------------------------------------------------------------------------------------------------

/// Prim's algorithm growing the tree from the first node of the topology.
///
/// Nodes not reachable from the first node are left out of the tree edges.
#[derive(Default)]
pub struct Prim;

impl SpanningTreeAlgorithm for Prim {
    fn spanning_tree(&self, topology: &Topology) -> SpanningTree {
        let mut tree = SpanningTree::empty(topology);
        let node_count = topology.node_count();
        if node_count == 0 {
            return tree;
        }

        let mut visited = vec![false; node_count];
        let mut visited_count = 1;
        let mut frontier = Frontier::default();
        visited[0] = true;
        frontier.extend(topology, 0, &visited);

        while visited_count < node_count {
            let edge = match frontier.pop() {
                Some(edge) => edge,
                None => break,
            };
            if visited[edge.to] {
                continue;
            }
            visited[edge.to] = true;
            visited_count += 1;
            tree.add_edge(topology, edge.from, edge.to, edge.weight);
            frontier.extend(topology, edge.to, &visited);
        }
        tree
    }
}
