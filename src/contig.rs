//! Contig reconstruction from the simplified graph.

use crate::graph::tools::{all_simple_paths, has_path};
use crate::graph::{DebruijnGraph, DebruijnNodeIndex};

/// A reconstructed contiguous sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    pub sequence: String,
}

impl Contig {
    pub fn new(sequence: String) -> Self {
        Contig { sequence }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Walk every simple path between the graph's current sources and sinks and
/// reconstruct one contig per path.
pub fn extract_contigs(graph: &DebruijnGraph) -> Vec<Contig> {
    extract_contigs_between(graph, &graph.sources(), &graph.sinks())
}

/// Contigs for every connected (source, sink) pair, ordered by source-list
/// order, then sink-list order, then path enumeration order. Identical
/// resulting sequences are not deduplicated.
pub fn extract_contigs_between(
    graph: &DebruijnGraph,
    sources: &[DebruijnNodeIndex],
    sinks: &[DebruijnNodeIndex],
) -> Vec<Contig> {
    let mut contigs = Vec::new();

    for &source in sources {
        for &sink in sinks {
            if !has_path(graph, source, sink) {
                continue;
            }

            for path in all_simple_paths(graph, source, sink) {
                contigs.push(Contig::new(path_sequence(graph, &path)));
            }
        }
    }

    contigs
}

/// The first node's full (k-1)-mer followed by the last symbol of every
/// subsequent node.
fn path_sequence(graph: &DebruijnGraph, path: &[DebruijnNodeIndex]) -> String {
    let mut sequence = String::new();
    if let Some((&first, rest)) = path.split_first() {
        sequence.push_str(graph.node_seq(first));
        for &node in rest {
            if let Some(symbol) = graph.node_seq(node).chars().last() {
                sequence.push(symbol);
            }
        }
    }

    sequence
}
