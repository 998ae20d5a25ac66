//! Helpers for building small test graphs in unit tests.

use super::{DebruijnGraph, EdgeData};

/// Build a graph from `(kmer, count)` pairs, the same way the graph builder
/// consumes counted k-mers.
pub(crate) fn graph_from_kmers(kmers: &[(&str, u32)]) -> DebruijnGraph {
    let mut graph = DebruijnGraph::new();
    for &(kmer, count) in kmers {
        graph.add_kmer(kmer, count);
    }

    graph
}

/// Build a graph from explicit `(source, target, weight)` edges with
/// free-form node labels, bypassing the k-mer overlap rule. Useful for
/// testing traversal and path selection on hand-drawn topologies.
pub(crate) fn graph_from_edges(edges: &[(&str, &str, u32)]) -> DebruijnGraph {
    let mut graph = DebruijnGraph::new();
    for &(source, target, weight) in edges {
        let s = graph.intern(source);
        let t = graph.intern(target);
        graph.graph.add_edge(s, t, EdgeData { weight });
    }

    graph
}
