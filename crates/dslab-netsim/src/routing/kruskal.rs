use crate::topology::Topology;

use super::union_find::DisjointSet;
use super::{SpanningTree, SpanningTreeAlgorithm};

/// Kruskal's algorithm.
///
/// Links are taken by ascending weight, links of equal weight in the order they were added to the topology.
#[derive(Default)]
pub struct Kruskal;

impl SpanningTreeAlgorithm for Kruskal {
    fn spanning_tree(&self, topology: &Topology) -> SpanningTree {
        let mut tree = SpanningTree::empty(topology);
        let links = topology.links();
        let mut order: Vec<usize> = (0..links.len()).collect();
        // sort_by is stable
        order.sort_by(|a, b| links[*a].weight.total_cmp(&links[*b].weight));

        let mut components = DisjointSet::new(topology.node_count());
        for link_id in order {
            let link = &links[link_id];
            if components.union(link.node1, link.node2) {
                tree.add_edge(topology, link.node1, link.node2, link.weight);
            }
        }
        tree
    }
}
