//! Loading topology from a text edge list.
//!
//! The format consists of a header line `N M` followed by `M` lines `U V W`, each describing an undirected
//! link of weight `W` between nodes `U` and `V`. Nodes are named `"0"` to `"N-1"`. Blank lines are skipped
//! and anything after the last edge line is ignored.

use crate::error::TopologyError;
use crate::topology::Topology;

/// Parses a topology, using `capacity` for every link.
///
/// The topology is built from scratch and returned only if the whole input is valid.
pub fn parse_topology(text: &str, capacity: f64) -> Result<Topology, TopologyError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, header) = lines.next().ok_or(TopologyError::MissingHeader)?;
    let (node_count, edge_count) = parse_header(header)?;

    let mut topology = Topology::new();
    for node in 0..node_count {
        topology.add_node(&node.to_string());
    }

    for found in 0..edge_count {
        let (line_num, line) = lines.next().ok_or(TopologyError::MissingEdges {
            expected: edge_count,
            found,
        })?;
        let (u, v, weight) = parse_edge(line_num, line)?;
        for node in [u, v] {
            if node < 0 || node as usize >= node_count {
                return Err(TopologyError::UnknownNode { line: line_num, node });
            }
        }
        if u == v {
            return Err(TopologyError::SelfLoop { line: line_num, node: u });
        }
        topology.add_link(&u.to_string(), &v.to_string(), weight as f64, capacity);
    }
    Ok(topology)
}

/// Reads a topology from a file, using `capacity` for every link.
pub fn load_topology(path: &str, capacity: f64) -> Result<Topology, TopologyError> {
    let text = std::fs::read_to_string(path).map_err(|source| TopologyError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_topology(&text, capacity)
}

fn parse_header(line: &str) -> Result<(usize, usize), TopologyError> {
    let invalid = || TopologyError::InvalidHeader(line.to_string());
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(invalid());
    }
    let node_count = fields[0].parse::<usize>().map_err(|_| invalid())?;
    let edge_count = fields[1].parse::<usize>().map_err(|_| invalid())?;
    Ok((node_count, edge_count))
}

fn parse_edge(line_num: usize, line: &str) -> Result<(i64, i64, i64), TopologyError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(TopologyError::InvalidEdge {
            line: line_num,
            reason: format!("expected 3 fields, found {}", fields.len()),
        });
    }
    let mut values = [0i64; 3];
    for (value, field) in values.iter_mut().zip(fields) {
        *value = field.parse().map_err(|_| TopologyError::InvalidEdge {
            line: line_num,
            reason: format!("'{}' is not an integer", field),
        })?;
    }
    Ok((values[0], values[1], values[2]))
}
