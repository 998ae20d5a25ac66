//! Bubble detection and resolution.
//!
//! A bubble exists at a node when two of its direct predecessors share a
//! lowest common ancestor: sequencing errors or true variants then show up as
//! alternative paths from that ancestor to the node, of which only one should
//! survive.

use itertools::Itertools;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::graph::tools::{all_simple_paths, lowest_common_ancestor};
use crate::graph::{DebruijnGraph, DebruijnNodeIndex};
use crate::simplify::{select_best_path, EndpointRemoval, PathCandidate};

/// Collapse every bubble in the graph to a single path.
///
/// Fixed-point loop: find the first bubble in scan order, resolve it, rescan
/// from the beginning. The full rescan after each structural change matters
/// because removing nodes can both create and destroy other bubbles.
///
/// Resolving a bubble whose discarded paths have no interior nodes removes
/// nothing; such bubbles are remembered and skipped until the next structural
/// change, so the loop always terminates.
pub fn simplify_bubbles(graph: &mut DebruijnGraph, seed: u64) {
    let mut stalled: FxHashSet<(DebruijnNodeIndex, DebruijnNodeIndex)> = FxHashSet::default();

    loop {
        let Some((ancestor, node)) = find_bubble(graph, &stalled) else {
            break;
        };

        let before = graph.node_count();
        solve_bubble(graph, ancestor, node, seed);

        if graph.node_count() == before {
            stalled.insert((ancestor, node));
        } else {
            stalled.clear();
        }
    }
}

/// First (ancestor, node) bubble in scan order: a node with more than one
/// direct predecessor, an unordered predecessor pair with a lowest common
/// ancestor, and at least two enumerable simple paths between the two.
fn find_bubble(
    graph: &DebruijnGraph,
    stalled: &FxHashSet<(DebruijnNodeIndex, DebruijnNodeIndex)>,
) -> Option<(DebruijnNodeIndex, DebruijnNodeIndex)> {
    for node in graph.nodes() {
        let preds: SmallVec<[DebruijnNodeIndex; 4]> = graph.predecessors(node).collect();
        if preds.len() < 2 {
            continue;
        }

        for (&p, &q) in preds.iter().tuple_combinations() {
            let Some(ancestor) = lowest_common_ancestor(graph, p, q) else {
                continue;
            };
            if stalled.contains(&(ancestor, node)) {
                continue;
            }
            // Cyclic regions can admit an ancestor but fewer than two simple
            // paths; those are not resolvable bubbles.
            if all_simple_paths(graph, ancestor, node).len() >= 2 {
                return Some((ancestor, node));
            }
        }
    }

    None
}

/// Resolve one bubble: enumerate every simple path from `ancestor` to `node`
/// and keep the best, removing the interior nodes of the rest.
pub fn solve_bubble(
    graph: &mut DebruijnGraph,
    ancestor: DebruijnNodeIndex,
    node: DebruijnNodeIndex,
    seed: u64,
) {
    let paths = all_simple_paths(graph, ancestor, node);
    if paths.len() < 2 {
        return;
    }

    let candidates: Vec<PathCandidate> = paths
        .into_iter()
        .map(|path| PathCandidate::new(graph, path))
        .collect();

    select_best_path(graph, candidates, EndpointRemoval::INTERIOR, seed);
}
