//! Graph serialization to disk using serde, DOT rendering and statistics.

use std::fmt;
use std::io::{self, Read, Write};

use petgraph::dot::{Config, Dot};
use petgraph::stable_graph::EdgeReference;
use serde::Serialize;

use crate::errors::AssemblyError;
use crate::graph::{DebruijnGraph, DebruijnGraphType, DebruijnNodeIndex, EdgeData, NodeData};

/// Edges at or below this weight are rendered dashed in DOT output.
pub const SOLID_EDGE_WEIGHT: u32 = 3;

pub fn save_graph(graph: &DebruijnGraph, out: impl Write) -> Result<(), AssemblyError> {
    bincode::serialize_into(out, graph)?;

    Ok(())
}

pub fn load_graph(reader: impl Read) -> Result<DebruijnGraph, AssemblyError> {
    let graph: DebruijnGraph = bincode::deserialize_from(reader)?;

    Ok(graph)
}

/// Render the graph in DOT format, distinguishing well-supported edges
/// (weight above [`SOLID_EDGE_WEIGHT`]) from dashed low-weight ones.
pub fn format_as_dot(writer: &mut impl fmt::Write, graph: &DebruijnGraph) -> fmt::Result {
    let config = [Config::NodeNoLabel, Config::EdgeNoLabel];
    let edge_attrs = |_: &DebruijnGraphType, edge: EdgeReference<'_, EdgeData>| {
        let weight = edge.weight().weight;
        if weight > SOLID_EDGE_WEIGHT {
            format!("label = \"{weight}\"")
        } else {
            format!("label = \"{weight}\", style = \"dashed\"")
        }
    };
    let node_attrs = |_: &DebruijnGraphType, (_, data): (DebruijnNodeIndex, &NodeData)| {
        format!("label = \"{}\"", data.seq)
    };

    let dot = Dot::with_attr_getters(&graph.graph, &config, &edge_attrs, &node_attrs);
    writeln!(writer, "{dot}")
}

/// Summary numbers for a (possibly simplified) assembly graph.
#[derive(Debug, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub sources: usize,
    pub sinks: usize,
    pub min_edge_weight: Option<u32>,
    pub max_edge_weight: Option<u32>,
}

impl GraphStats {
    pub fn from_graph(graph: &DebruijnGraph) -> Self {
        GraphStats {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            sources: graph.sources().len(),
            sinks: graph.sinks().len(),
            min_edge_weight: graph.edge_weights().min(),
            max_edge_weight: graph.edge_weights().max(),
        }
    }
}

pub fn write_stats<W: Write>(graph: &DebruijnGraph, out: W) -> Result<(), AssemblyError> {
    let stats = GraphStats::from_graph(graph);
    serde_json::to_writer_pretty(out, &stats).map_err(io::Error::from)?;

    Ok(())
}
