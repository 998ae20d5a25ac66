//! The assembly pipeline: k-mer counting, graph construction, the
//! simplification passes and contig extraction, run sequentially over one
//! in-memory graph.

use tracing::{debug, info};

use crate::contig::{extract_contigs, Contig};
use crate::errors::AssemblyError;
use crate::graph::DebruijnGraph;
use crate::kmer::KmerCounts;
use crate::simplify::bubbles::simplify_bubbles;
use crate::simplify::tips::{resolve_entry_tips, resolve_out_tips};
use crate::simplify::DEFAULT_TIE_BREAK_SEED;

pub const DEFAULT_KMER_SIZE: usize = 22;

#[derive(Debug, Clone)]
pub struct AssemblyConfig {
    /// K-mer size; graph nodes are (k-1)-mers
    pub k: usize,

    /// Seed for the deterministic tie-breaking draw in path selection
    pub tie_break_seed: u64,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        AssemblyConfig {
            k: DEFAULT_KMER_SIZE,
            tie_break_seed: DEFAULT_TIE_BREAK_SEED,
        }
    }
}

impl AssemblyConfig {
    pub fn validate(&self) -> Result<(), AssemblyError> {
        if self.k < 2 {
            return Err(AssemblyError::InvalidKmerSize(self.k));
        }

        Ok(())
    }
}

/// The result of a full assembly run: the simplified graph and the contigs
/// extracted from it.
#[derive(Debug)]
pub struct Assembly {
    pub graph: DebruijnGraph,
    pub contigs: Vec<Contig>,
}

/// Run the full pipeline over the given reads.
///
/// Degenerate input (no reads, or every read shorter than k) produces an
/// empty graph and an empty contig list rather than an error.
pub fn assemble<S: AsRef<str>>(reads: &[S], config: &AssemblyConfig) -> Result<Assembly, AssemblyError> {
    config.validate()?;

    let counts = KmerCounts::from_reads(reads.iter().map(|r| r.as_ref()), config.k);
    info!(distinct_kmers = counts.len(), "counted k-mers");

    let mut graph = DebruijnGraph::from_kmer_counts(&counts);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built de Bruijn graph"
    );

    simplify_bubbles(&mut graph, config.tie_break_seed);
    debug!(nodes = graph.node_count(), "resolved bubbles");

    resolve_entry_tips(&mut graph, config.tie_break_seed);
    resolve_out_tips(&mut graph, config.tie_break_seed);
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "trimmed tips"
    );

    let contigs = extract_contigs(&graph);
    info!(contigs = contigs.len(), "extracted contigs");

    Ok(Assembly { graph, contigs })
}
