//! Network topology.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};

use crate::link::{Link, LinkId};
use crate::node::NodeId;

/// Undirected weighted graph of named nodes connected by links.
///
/// Nodes and links are kept in insertion order, which is the canonical iteration order used by
/// all routing algorithms. There is at most one link between any unordered pair of nodes and no
/// link connects a node to itself.
#[derive(Clone, Debug, Default)]
pub struct Topology {
    nodes: IndexSet<String>,
    links: Vec<Link>,
    adjacency: Vec<IndexMap<NodeId, LinkId>>,
}

impl Topology {
    /// Creates an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with the given name and returns its id.
    ///
    /// Adding an already existing node is a no-op which returns the id of that node.
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(id) = self.nodes.get_index_of(name) {
            return id;
        }
        let (id, _) = self.nodes.insert_full(name.to_string());
        self.adjacency.push(IndexMap::new());
        id
    }

    /// Adds a link between two existing nodes and returns its id.
    ///
    /// If the nodes are already connected, the existing link keeps its id and position and gets the new
    /// weight and capacity. Returns `None` if any of the nodes is unknown or both names refer to the same node.
    pub fn add_link(&mut self, node1: &str, node2: &str, weight: f64, capacity: f64) -> Option<LinkId> {
        let id1 = self.node_id(node1)?;
        let id2 = self.node_id(node2)?;
        if id1 == id2 {
            return None;
        }
        if let Some(&link_id) = self.adjacency[id1].get(&id2) {
            let link = &mut self.links[link_id];
            link.weight = weight;
            link.capacity = capacity;
            return Some(link_id);
        }
        let link_id = self.links.len();
        self.links.push(Link::new(id1, id2, weight, capacity));
        self.adjacency[id1].insert(id2, link_id);
        self.adjacency[id2].insert(id1, link_id);
        Some(link_id)
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of links.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Returns the id of the node with the given name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.nodes.get_index_of(name)
    }

    /// Returns the name of the node with the given id.
    ///
    /// Panics if there is no such node.
    pub fn node_name(&self, id: NodeId) -> &str {
        &self.nodes[id]
    }

    /// Checks whether the node with the given name exists.
    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }

    /// Returns node names in insertion order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(|name| name.as_str())
    }

    /// Returns all links in insertion order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns the link connecting two nodes, if any.
    pub fn link_between(&self, node1: NodeId, node2: NodeId) -> Option<&Link> {
        self.adjacency
            .get(node1)
            .and_then(|neighbors| neighbors.get(&node2))
            .map(|link_id| &self.links[*link_id])
    }

    /// Returns neighbors of the node together with the connecting links, in the order the links were added.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &Link)> + '_ {
        self.adjacency[node]
            .iter()
            .map(move |(neighbor, link_id)| (*neighbor, &self.links[*link_id]))
    }

    /// Checks whether `dst` is reachable from `src` (ignoring link weights).
    pub fn has_path(&self, src: NodeId, dst: NodeId) -> bool {
        if src >= self.node_count() || dst >= self.node_count() {
            return false;
        }
        let mut visited = vec![false; self.node_count()];
        let mut queue = VecDeque::from([src]);
        visited[src] = true;
        while let Some(node) = queue.pop_front() {
            if node == dst {
                return true;
            }
            for neighbor in self.adjacency[node].keys() {
                if !visited[*neighbor] {
                    visited[*neighbor] = true;
                    queue.push_back(*neighbor);
                }
            }
        }
        false
    }
}
