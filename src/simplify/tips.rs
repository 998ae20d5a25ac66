//! Entry- and exit-tip trimming.
//!
//! Tips are short dead-end branches hanging off the assembly path near a
//! source or sink, usually sequencing artifacts rather than genuine overlap.
//! Both passes compete the paths from the current sources (or to the current
//! sinks) against each other and keep the best one.

use crate::graph::tools::first_simple_path;
use crate::graph::{DebruijnGraph, DebruijnNodeIndex};
use crate::simplify::{select_best_path, EndpointRemoval, PathCandidate};

/// Trim entry tips until none remain.
///
/// Each round: recompute the source set (it changes as nodes are removed),
/// find the first node in scan order with more than one direct predecessor
/// that is reachable from at least two sources, and resolve the per-source
/// paths with the discarded paths' entry nodes removed as well. The scan
/// restarts after every resolution to stay correct as the topology shifts.
pub fn resolve_entry_tips(graph: &mut DebruijnGraph, seed: u64) {
    loop {
        let sources = graph.sources();
        let Some(candidates) = find_entry_tip(graph, &sources) else {
            break;
        };

        select_best_path(graph, candidates, EndpointRemoval::WITH_ENTRY, seed);
    }
}

/// Trim exit tips until none remain. Mirror of [`resolve_entry_tips`]:
/// nodes with more than one direct successor, paths to the current sinks,
/// and the discarded paths' sink nodes removed as well.
pub fn resolve_out_tips(graph: &mut DebruijnGraph, seed: u64) {
    loop {
        let sinks = graph.sinks();
        let Some(candidates) = find_out_tip(graph, &sinks) else {
            break;
        };

        select_best_path(graph, candidates, EndpointRemoval::WITH_SINK, seed);
    }
}

fn find_entry_tip(graph: &DebruijnGraph, sources: &[DebruijnNodeIndex]) -> Option<Vec<PathCandidate>> {
    for node in graph.nodes() {
        if graph.in_degree(node) < 2 {
            continue;
        }

        // One path per source that reaches this node, first in enumeration
        // order, as the competing candidates
        let mut candidates = Vec::new();
        for &source in sources {
            if let Some(path) = first_simple_path(graph, source, node) {
                candidates.push(PathCandidate::new(graph, path));
            }
        }

        if candidates.len() >= 2 {
            return Some(candidates);
        }
    }

    None
}

fn find_out_tip(graph: &DebruijnGraph, sinks: &[DebruijnNodeIndex]) -> Option<Vec<PathCandidate>> {
    for node in graph.nodes() {
        if graph.out_degree(node) < 2 {
            continue;
        }

        let mut candidates = Vec::new();
        for &sink in sinks {
            if let Some(path) = first_simple_path(graph, node, sink) {
                candidates.push(PathCandidate::new(graph, path));
            }
        }

        if candidates.len() >= 2 {
            return Some(candidates);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use crate::graph::mock::graph_from_kmers;
    use crate::simplify::tips::{resolve_entry_tips, resolve_out_tips};
    use crate::simplify::DEFAULT_TIE_BREAK_SEED;

    #[test]
    fn test_entry_tip_is_trimmed() {
        // Main chain ab -> bc -> cd -> de with a weak xb -> bc branch
        let mut graph = graph_from_kmers(&[
            ("abc", 5),
            ("bcd", 5),
            ("cde", 5),
            ("xbc", 1),
        ]);
        assert_eq!(graph.sources().len(), 2);

        resolve_entry_tips(&mut graph, DEFAULT_TIE_BREAK_SEED);

        assert!(graph.node("xb").is_none());
        for label in ["ab", "bc", "cd", "de"] {
            assert!(graph.node(label).is_some(), "{label} should survive");
        }
        assert_eq!(graph.sources().len(), 1);
    }

    #[test]
    fn test_out_tip_is_trimmed() {
        // Main chain ab -> bc -> cd -> de with a weak cd -> dx branch
        let mut graph = graph_from_kmers(&[
            ("abc", 5),
            ("bcd", 5),
            ("cde", 5),
            ("cdx", 1),
        ]);
        assert_eq!(graph.sinks().len(), 2);

        resolve_out_tips(&mut graph, DEFAULT_TIE_BREAK_SEED);

        assert!(graph.node("dx").is_none());
        for label in ["ab", "bc", "cd", "de"] {
            assert!(graph.node(label).is_some(), "{label} should survive");
        }
        assert_eq!(graph.sinks().len(), 1);
    }

    #[test]
    fn test_longer_entry_tip_survives_on_equal_weights() {
        // Sources za and xb both feed bc with equal weights; the za path is
        // longer and wins on the length rule
        let mut graph = graph_from_kmers(&[
            ("zab", 2),
            ("abc", 2),
            ("bcd", 2),
            ("xbc", 2),
        ]);

        resolve_entry_tips(&mut graph, DEFAULT_TIE_BREAK_SEED);

        assert!(graph.node("xb").is_none());
        assert!(graph.node("za").is_some());
        assert!(graph.node("ab").is_some());
    }

    #[test]
    fn test_tip_resolution_is_idempotent() {
        let mut graph = graph_from_kmers(&[
            ("abc", 5),
            ("bcd", 5),
            ("cde", 5),
            ("xbc", 1),
            ("cdx", 1),
        ]);

        resolve_entry_tips(&mut graph, DEFAULT_TIE_BREAK_SEED);
        resolve_out_tips(&mut graph, DEFAULT_TIE_BREAK_SEED);
        let nodes = graph.node_count();
        let edges = graph.edge_count();

        resolve_entry_tips(&mut graph, DEFAULT_TIE_BREAK_SEED);
        resolve_out_tips(&mut graph, DEFAULT_TIE_BREAK_SEED);

        assert_eq!(graph.node_count(), nodes);
        assert_eq!(graph.edge_count(), edges);
    }

    #[test]
    fn test_clean_chain_is_untouched() {
        let mut graph = graph_from_kmers(&[("abc", 5), ("bcd", 5), ("cde", 5)]);
        let nodes = graph.node_count();

        resolve_entry_tips(&mut graph, DEFAULT_TIE_BREAK_SEED);
        resolve_out_tips(&mut graph, DEFAULT_TIE_BREAK_SEED);

        assert_eq!(graph.node_count(), nodes);
    }
}
