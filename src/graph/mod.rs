pub mod tools;

#[cfg(test)]
pub(crate) mod mock;

use std::fmt::{Display, Formatter};

use petgraph::prelude::{NodeIndex, StableDiGraph};
use petgraph::{Incoming, Outgoing};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::io::graph::format_as_dot;
use crate::kmer::KmerCounts;

/// Node payload: the (k-1)-mer this node represents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub seq: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeData {
    pub weight: u32,
}

impl Display for NodeData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.seq)
    }
}

impl Display for EdgeData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.weight)
    }
}

pub type DebruijnGraphType = StableDiGraph<NodeData, EdgeData, u32>;
pub type DebruijnNodeIndex = NodeIndex<u32>;

/// A de Bruijn graph over (k-1)-mer nodes.
///
/// Each distinct k-mer contributes exactly one edge from its (k-1)-prefix to
/// its (k-1)-suffix, weighted by the k-mer's total occurrence count. Nodes are
/// interned by their string, so the graph holds at most one node instance per
/// distinct (k-1)-mer. Self-loops (k-mers whose prefix equals their suffix)
/// are permitted and not special-cased.
///
/// The stable-index storage keeps node indices valid across removals, so the
/// simplification passes can scan nodes in a deterministic, reproducible
/// order while mutating the graph in place.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DebruijnGraph {
    pub graph: DebruijnGraphType,
    node_ids: FxHashMap<String, DebruijnNodeIndex>,
}

impl DebruijnGraph {
    pub fn new() -> Self {
        DebruijnGraph {
            graph: DebruijnGraphType::default(),
            node_ids: FxHashMap::default(),
        }
    }

    /// Build the graph from k-mer occurrence counts, one edge per distinct
    /// k-mer, in the counts' iteration order.
    pub fn from_kmer_counts(counts: &KmerCounts) -> Self {
        let mut graph = Self::new();
        for (kmer, count) in counts.iter() {
            graph.add_kmer(kmer, count);
        }

        graph
    }

    /// Add the edge for one distinct k-mer: (k-1)-prefix node to (k-1)-suffix
    /// node, weighted by the k-mer's occurrence count.
    pub fn add_kmer(&mut self, kmer: &str, count: u32) {
        debug_assert!(kmer.len() >= 2, "k-mers must have at least two symbols");

        let prefix = &kmer[..kmer.len() - 1];
        let suffix = &kmer[1..];
        let source = self.intern(prefix);
        let target = self.intern(suffix);

        // (source, target) fully determines the k-mer, so each distinct k-mer
        // maps to its own edge; accumulate if the same k-mer is added twice.
        if let Some(e) = self.graph.find_edge(source, target) {
            self.graph[e].weight += count;
        } else {
            self.graph.add_edge(source, target, EdgeData { weight: count });
        }
    }

    fn intern(&mut self, seq: &str) -> DebruijnNodeIndex {
        if let Some(&ix) = self.node_ids.get(seq) {
            return ix;
        }

        let ix = self.graph.add_node(NodeData { seq: seq.to_owned() });
        self.node_ids.insert(seq.to_owned(), ix);
        ix
    }

    /// Look up a node by its (k-1)-mer string.
    pub fn node(&self, seq: &str) -> Option<DebruijnNodeIndex> {
        self.node_ids.get(seq).copied()
    }

    pub fn node_seq(&self, node: DebruijnNodeIndex) -> &str {
        &self.graph[node].seq
    }

    /// All live nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = DebruijnNodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn predecessors(&self, node: DebruijnNodeIndex) -> impl Iterator<Item = DebruijnNodeIndex> + '_ {
        self.graph.neighbors_directed(node, Incoming)
    }

    pub fn successors(&self, node: DebruijnNodeIndex) -> impl Iterator<Item = DebruijnNodeIndex> + '_ {
        self.graph.neighbors_directed(node, Outgoing)
    }

    pub fn in_degree(&self, node: DebruijnNodeIndex) -> usize {
        self.graph.neighbors_directed(node, Incoming).count()
    }

    pub fn out_degree(&self, node: DebruijnNodeIndex) -> usize {
        self.graph.neighbors_directed(node, Outgoing).count()
    }

    /// Nodes without predecessors, in node order.
    pub fn sources(&self) -> Vec<DebruijnNodeIndex> {
        self.nodes().filter(|&n| self.in_degree(n) == 0).collect()
    }

    /// Nodes without successors, in node order.
    pub fn sinks(&self) -> Vec<DebruijnNodeIndex> {
        self.nodes().filter(|&n| self.out_degree(n) == 0).collect()
    }

    pub fn edge_weight(&self, source: DebruijnNodeIndex, target: DebruijnNodeIndex) -> Option<u32> {
        self.graph
            .find_edge(source, target)
            .and_then(|e| self.graph.edge_weight(e))
            .map(|data| data.weight)
    }

    pub fn edge_weights(&self) -> impl Iterator<Item = u32> + '_ {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_weight(e))
            .map(|data| data.weight)
    }

    /// Remove a node together with all its incident edges.
    ///
    /// Removing an already-removed node is a no-op, which lets callers remove
    /// overlapping path slices without tracking what went first.
    pub fn remove_node(&mut self, node: DebruijnNodeIndex) {
        if let Some(data) = self.graph.remove_node(node) {
            self.node_ids.remove(&data.seq);
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl Display for DebruijnGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        format_as_dot(f, self)
    }
}
