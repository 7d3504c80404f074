use std::error::Error;
use std::io::Write;

use clap::{Parser, Subcommand};
use env_logger::Builder;
use serde_json::{json, Value};

use dslab_netsim::loader::load_topology;
use dslab_netsim::routing::{find_path, spanning_tree};
use dslab_netsim::{log_info, log_warn, NetworkSimulator, PathAlgorithm, SimulationConfig, TreeAlgorithm};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
/// Routing algorithms and packet forwarding on a network topology
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Computes a path between two nodes
    Route {
        /// Path to topology file
        #[arg(short, long)]
        topology: String,

        /// Source node
        #[arg(short, long)]
        source: String,

        /// Target node
        #[arg(short = 'd', long)]
        target: String,

        /// Routing algorithm (dijkstra, bellman_ford, floyd_warshall)
        #[arg(short, long, default_value = "dijkstra")]
        algorithm: String,

        /// Include algorithm steps into output
        #[arg(long)]
        trace: bool,
    },
    /// Computes a minimum spanning tree
    Tree {
        /// Path to topology file
        #[arg(short, long)]
        topology: String,

        /// Spanning tree algorithm (prim_mst, kruskal_mst)
        #[arg(short, long, default_value = "prim_mst")]
        algorithm: String,

        /// Include algorithm steps into output
        #[arg(long)]
        trace: bool,
    },
    /// Sends packets through the network and reports the results
    Simulate {
        /// Path to topology file
        #[arg(short, long)]
        topology: String,

        /// Path to YAML file with simulation config
        #[arg(short, long)]
        config: Option<String>,

        /// Packet to send in SOURCE:DESTINATION form (can be repeated)
        #[arg(short, long = "packet", value_parser = parse_packet)]
        packets: Vec<(String, String)>,

        /// Maximum number of simulation steps
        #[arg(long, default_value_t = 1000)]
        steps: u64,

        /// Include simulation events into output
        #[arg(long)]
        events: bool,
    },
}

fn parse_packet(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((src, dst)) if !src.is_empty() && !dst.is_empty() => Ok((src.to_string(), dst.to_string())),
        _ => Err(format!("expected SOURCE:DESTINATION, got '{}'", s)),
    }
}

fn route(topology: &str, source: &str, target: &str, algorithm: &str, trace: bool) -> Result<Value, Box<dyn Error>> {
    let topology = load_topology(topology, SimulationConfig::default().default_capacity)?;
    let algorithm = PathAlgorithm::from_name(algorithm);
    let result = find_path(&topology, source, target, algorithm);
    let distance = result.path_distance();
    let mut output = json!({
        "algorithm": algorithm,
        "path": result.path,
        "distance": distance,
    });
    if trace {
        output["steps"] = serde_json::to_value(&result.steps)?;
    }
    Ok(output)
}

fn tree(topology: &str, algorithm: &str, trace: bool) -> Result<Value, Box<dyn Error>> {
    let topology = load_topology(topology, SimulationConfig::default().default_capacity)?;
    let algorithm = TreeAlgorithm::from_name(algorithm)?;
    let tree = spanning_tree(&topology, algorithm);
    let total_weight = tree.total_weight();
    let mut output = json!({
        "algorithm": algorithm.name(),
        "edges": tree.edges,
        "total_weight": total_weight,
    });
    if trace {
        output["steps"] = serde_json::to_value(&tree.steps)?;
    }
    Ok(output)
}

fn simulate(
    topology: &str,
    config: Option<&str>,
    packets: &[(String, String)],
    steps: u64,
    events: bool,
) -> Result<Value, Box<dyn Error>> {
    let config = match config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };
    let topology = load_topology(topology, config.default_capacity)?;
    let mut sim = NetworkSimulator::from_topology(topology, config);

    for (src, dst) in packets {
        if sim.create_packet(src, dst).is_none() {
            log_warn!(sim, "packet from {} to {} is not sent", src, dst);
        }
    }
    let sim_events = sim.step_until_idle(steps);
    let metrics = sim.metrics();
    log_info!(
        sim,
        "sent {}, delivered {}, dropped {}",
        metrics.metrics.packets_sent,
        metrics.metrics.packets_delivered,
        metrics.metrics.packets_dropped
    );

    let mut output = serde_json::to_value(sim.snapshot())?;
    if events {
        output["events"] = serde_json::to_value(&sim_events)?;
    }
    Ok(output)
}

fn main() {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let args = Args::parse();
    let result = match &args.command {
        Command::Route {
            topology,
            source,
            target,
            algorithm,
            trace,
        } => route(topology, source, target, algorithm, *trace),
        Command::Tree {
            topology,
            algorithm,
            trace,
        } => tree(topology, algorithm, *trace),
        Command::Simulate {
            topology,
            config,
            packets,
            steps,
            events,
        } => simulate(topology, config.as_deref(), packets, *steps, *events),
    };

    match result.and_then(|output| Ok(serde_json::to_string_pretty(&output)?)) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    }
}
