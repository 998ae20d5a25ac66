//! Graph simplification: the shared best-path selection heuristic and the
//! bubble and tip passes built on top of it.

pub mod bubbles;
pub mod tips;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{DebruijnGraph, DebruijnNodeIndex};

/// Default seed for the tie-breaking draw between otherwise equal paths.
pub const DEFAULT_TIE_BREAK_SEED: u64 = 9001;

/// A candidate path between two fixed nodes, annotated with its mean edge
/// weight. Its length is the node count.
#[derive(Debug, Clone)]
pub struct PathCandidate {
    pub nodes: Vec<DebruijnNodeIndex>,
    pub mean_weight: f64,
}

impl PathCandidate {
    pub fn new(graph: &DebruijnGraph, nodes: Vec<DebruijnNodeIndex>) -> Self {
        let mean_weight = path_average_weight(graph, &nodes);
        PathCandidate { nodes, mean_weight }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Which endpoint nodes of a discarded path are removed along with its
/// interior nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EndpointRemoval {
    pub entry: bool,
    pub sink: bool,
}

impl EndpointRemoval {
    /// Keep both endpoints; remove interior nodes only (bubble resolution).
    pub const INTERIOR: Self = EndpointRemoval { entry: false, sink: false };

    /// Also remove the discarded path's first node (entry-tip trimming).
    pub const WITH_ENTRY: Self = EndpointRemoval { entry: true, sink: false };

    /// Also remove the discarded path's last node (exit-tip trimming).
    pub const WITH_SINK: Self = EndpointRemoval { entry: false, sink: true };
}

/// Mean weight over a path's consecutive edges. Zero for paths without edges.
pub fn path_average_weight(graph: &DebruijnGraph, nodes: &[DebruijnNodeIndex]) -> f64 {
    let weights: Vec<u32> = nodes
        .iter()
        .tuple_windows()
        .filter_map(|(&source, &target)| graph.edge_weight(source, target))
        .collect();

    if weights.is_empty() {
        return 0.0;
    }

    weights.iter().map(|&w| f64::from(w)).sum::<f64>() / weights.len() as f64
}

/// Keep exactly one of several competing paths sharing the same start and end
/// node, removing the others from the graph.
///
/// Decision rule, evaluated in order:
/// 1. if the mean weights differ, keep the path with the highest mean weight;
/// 2. else if the lengths differ, keep the longest path;
/// 3. else draw one candidate uniformly with an `StdRng` seeded from `seed`
///    and discard only that one, keeping the rest.
///
/// "Differ" is a sample standard deviation strictly above zero. On ties for
/// the maximum itself, the first maximum in candidate order wins. The draw in
/// the final branch is always strictly within `[0, candidates.len())`.
///
/// Fewer than two candidates leave the graph untouched.
pub fn select_best_path(
    graph: &mut DebruijnGraph,
    mut candidates: Vec<PathCandidate>,
    removal: EndpointRemoval,
    seed: u64,
) {
    if candidates.len() < 2 {
        return;
    }

    let weights: Vec<f64> = candidates.iter().map(|c| c.mean_weight).collect();
    let lengths: Vec<f64> = candidates.iter().map(|c| c.len() as f64).collect();

    if sample_std_dev(&weights) > 0.0 {
        candidates.remove(index_of_max(&weights));
        remove_paths(graph, &candidates, removal);
    } else if sample_std_dev(&lengths) > 0.0 {
        candidates.remove(index_of_max(&lengths));
        remove_paths(graph, &candidates, removal);
    } else {
        let mut rng = StdRng::seed_from_u64(seed);
        let discard = rng.gen_range(0..candidates.len());
        remove_paths(graph, std::slice::from_ref(&candidates[discard]), removal);
    }
}

/// Remove the given discarded paths' nodes from the graph. Interior nodes are
/// always removed; `removal` controls whether each path's first and last node
/// go too. Removing a node removes all its incident edges.
pub fn remove_paths(graph: &mut DebruijnGraph, paths: &[PathCandidate], removal: EndpointRemoval) {
    for path in paths {
        let nodes = &path.nodes;
        let doomed: &[DebruijnNodeIndex] = match (removal.entry, removal.sink) {
            (true, true) => nodes,
            (true, false) => &nodes[..nodes.len() - 1],
            (false, true) => &nodes[1..],
            (false, false) => {
                if nodes.len() > 2 {
                    &nodes[1..nodes.len() - 1]
                } else {
                    &[]
                }
            }
        };

        for &node in doomed {
            graph.remove_node(node);
        }
    }
}

fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Index of the first maximum.
fn index_of_max(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = i;
        }
    }

    best
}
