//! Step traces of routing algorithms.

use serde::Serialize;

/// A single record describing the progress of a routing algorithm.
///
/// Traces are produced for external observers (e.g. visualizers) and do not affect the results.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepRecord {
    /// Node is selected and its distance becomes final.
    Visit {
        /// Selected node.
        node: String,
        /// Its distance from the source.
        distance: f64,
    },
    /// A shorter distance to the node is discovered.
    Update {
        /// Updated node.
        node: String,
        /// New distance from the source.
        distance: f64,
        /// Node through which the new distance is achieved.
        #[serde(skip_serializing_if = "Option::is_none")]
        predecessor: Option<String>,
    },
    /// A link still admits relaxation after convergence.
    NegativeCycle {
        /// First endpoint of the link.
        node1: String,
        /// Second endpoint of the link.
        node2: String,
    },
    /// A link is accepted into a spanning tree.
    AddEdge {
        /// Endpoint already in the tree (Prim) or first endpoint of the link (Kruskal).
        node1: String,
        /// Other endpoint.
        node2: String,
        /// Link weight.
        weight: f64,
    },
    /// The distance between `from` and `to` is improved by going through `via`.
    FloydUpdate {
        /// Start of the improved pair.
        from: String,
        /// End of the improved pair.
        to: String,
        /// Intermediate node.
        via: String,
        /// New distance.
        distance: f64,
    },
}
