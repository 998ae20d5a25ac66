//! Explicit traversal primitives for the de Bruijn graph.
//!
//! The simplification passes need reachability tests, exhaustive simple-path
//! enumeration and lowest-common-ancestor queries on a graph that is mutated
//! between calls and may contain cycles, so these are built directly on the
//! adjacency structure rather than taken from a graph library.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use super::{DebruijnGraph, DebruijnNodeIndex};

/// Whether `to` can be reached from `from` along directed edges.
///
/// Every node trivially reaches itself.
pub fn has_path(graph: &DebruijnGraph, from: DebruijnNodeIndex, to: DebruijnNodeIndex) -> bool {
    if from == to {
        return true;
    }

    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::new();
    visited.insert(from);
    queue.push_back(from);

    while let Some(node) = queue.pop_front() {
        for succ in graph.successors(node) {
            if succ == to {
                return true;
            }
            if visited.insert(succ) {
                queue.push_back(succ);
            }
        }
    }

    false
}

/// All simple directed paths from `from` to `to`, in a deterministic
/// depth-first enumeration order.
///
/// The visited set tracks only the nodes on the current path, which guards
/// against cycles without pruning alternative routes. `from == to` yields the
/// single trivial path `[from]`. Worst-case exponential in the graph size.
pub fn all_simple_paths(
    graph: &DebruijnGraph,
    from: DebruijnNodeIndex,
    to: DebruijnNodeIndex,
) -> Vec<Vec<DebruijnNodeIndex>> {
    simple_paths(graph, from, to, usize::MAX)
}

/// The first simple path from `from` to `to` in enumeration order, if any.
pub fn first_simple_path(
    graph: &DebruijnGraph,
    from: DebruijnNodeIndex,
    to: DebruijnNodeIndex,
) -> Option<Vec<DebruijnNodeIndex>> {
    simple_paths(graph, from, to, 1).into_iter().next()
}

fn simple_paths(
    graph: &DebruijnGraph,
    from: DebruijnNodeIndex,
    to: DebruijnNodeIndex,
    limit: usize,
) -> Vec<Vec<DebruijnNodeIndex>> {
    if limit == 0 {
        return Vec::new();
    }
    if from == to {
        return vec![vec![from]];
    }

    let mut paths = Vec::new();
    let mut path = vec![from];
    let mut on_path: FxHashSet<DebruijnNodeIndex> = FxHashSet::default();
    on_path.insert(from);

    // One successor cursor per node on the current path
    let mut stack = vec![successor_list(graph, from).into_iter()];

    while let Some(cursor) = stack.last_mut() {
        match cursor.next() {
            Some(next) if next == to => {
                let mut complete = path.clone();
                complete.push(to);
                paths.push(complete);
                if paths.len() == limit {
                    return paths;
                }
            }
            Some(next) => {
                if !on_path.contains(&next) {
                    on_path.insert(next);
                    path.push(next);
                    stack.push(successor_list(graph, next).into_iter());
                }
            }
            None => {
                stack.pop();
                if let Some(done) = path.pop() {
                    on_path.remove(&done);
                }
            }
        }
    }

    paths
}

fn successor_list(graph: &DebruijnGraph, node: DebruijnNodeIndex) -> Vec<DebruijnNodeIndex> {
    graph.successors(node).collect()
}

/// Lowest common ancestor of `a` and `b`: a node from which both are
/// reachable, minimizing the summed BFS distance to the two nodes, with node
/// order breaking ties. Each node counts as its own ancestor at distance
/// zero. Returns `None` when the ancestor sets do not intersect.
pub fn lowest_common_ancestor(
    graph: &DebruijnGraph,
    a: DebruijnNodeIndex,
    b: DebruijnNodeIndex,
) -> Option<DebruijnNodeIndex> {
    let depths_a = ancestor_depths(graph, a);
    let depths_b = ancestor_depths(graph, b);

    let mut best: Option<(usize, DebruijnNodeIndex)> = None;
    for node in graph.nodes() {
        let (Some(&da), Some(&db)) = (depths_a.get(&node), depths_b.get(&node)) else {
            continue;
        };

        let total = da + db;
        if best.map_or(true, |(best_total, _)| total < best_total) {
            best = Some((total, node));
        }
    }

    best.map(|(_, node)| node)
}

/// Reverse BFS from `node`, mapping every ancestor to its edge distance.
fn ancestor_depths(graph: &DebruijnGraph, node: DebruijnNodeIndex) -> FxHashMap<DebruijnNodeIndex, usize> {
    let mut depths = FxHashMap::default();
    let mut queue = VecDeque::new();
    depths.insert(node, 0);
    queue.push_back(node);

    while let Some(curr) = queue.pop_front() {
        let next_depth = depths[&curr] + 1;
        for pred in graph.predecessors(curr) {
            if !depths.contains_key(&pred) {
                depths.insert(pred, next_depth);
                queue.push_back(pred);
            }
        }
    }

    depths
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use crate::graph::mock::graph_from_edges;
    use crate::graph::tools::{all_simple_paths, first_simple_path, has_path, lowest_common_ancestor};

    #[test]
    fn test_has_path() {
        let graph = graph_from_edges(&[("a", "b", 1), ("b", "c", 1), ("d", "c", 1)]);
        let a = graph.node("a").unwrap();
        let c = graph.node("c").unwrap();
        let d = graph.node("d").unwrap();

        assert!(has_path(&graph, a, c));
        assert!(has_path(&graph, a, a));
        assert!(!has_path(&graph, a, d));
        assert!(!has_path(&graph, c, a));
    }

    #[test]
    fn test_all_simple_paths_in_diamond() {
        let graph = graph_from_edges(&[
            ("s", "a", 1),
            ("s", "b", 1),
            ("a", "t", 1),
            ("b", "t", 1),
        ]);
        let s = graph.node("s").unwrap();
        let t = graph.node("t").unwrap();

        let paths: FxHashSet<Vec<&str>> = all_simple_paths(&graph, s, t)
            .into_iter()
            .map(|path| path.into_iter().map(|n| graph.node_seq(n)).collect())
            .collect();

        assert_eq!(paths, FxHashSet::from_iter([
            vec!["s", "a", "t"],
            vec!["s", "b", "t"],
        ]));
    }

    #[test]
    fn test_simple_paths_do_not_revisit_cycles() {
        // s -> a -> b -> a cycle, with b -> t as the only way out
        let graph = graph_from_edges(&[
            ("s", "a", 1),
            ("a", "b", 1),
            ("b", "a", 1),
            ("b", "t", 1),
        ]);
        let s = graph.node("s").unwrap();
        let t = graph.node("t").unwrap();

        let paths = all_simple_paths(&graph, s, t);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 4);
    }

    #[test]
    fn test_trivial_path_to_self() {
        let graph = graph_from_edges(&[("a", "b", 1)]);
        let a = graph.node("a").unwrap();

        assert_eq!(all_simple_paths(&graph, a, a), vec![vec![a]]);
    }

    #[test]
    fn test_first_simple_path_matches_enumeration() {
        let graph = graph_from_edges(&[
            ("s", "a", 1),
            ("s", "b", 1),
            ("a", "t", 1),
            ("b", "t", 1),
        ]);
        let s = graph.node("s").unwrap();
        let t = graph.node("t").unwrap();

        let all = all_simple_paths(&graph, s, t);
        assert_eq!(first_simple_path(&graph, s, t).as_ref(), all.first());
        assert_eq!(first_simple_path(&graph, t, s), None);
    }

    #[test]
    fn test_lowest_common_ancestor() {
        let graph = graph_from_edges(&[
            ("r", "a", 1),
            ("a", "b", 1),
            ("a", "c", 1),
            ("b", "d", 1),
            ("c", "d", 1),
        ]);
        let a = graph.node("a").unwrap();
        let b = graph.node("b").unwrap();
        let c = graph.node("c").unwrap();

        assert_eq!(lowest_common_ancestor(&graph, b, c), Some(a));
        // A node that is an ancestor of the other is their LCA
        assert_eq!(lowest_common_ancestor(&graph, a, b), Some(a));
    }

    #[test]
    fn test_lowest_common_ancestor_none_for_disjoint_components() {
        let graph = graph_from_edges(&[("a", "b", 1), ("c", "d", 1)]);
        let b = graph.node("b").unwrap();
        let d = graph.node("d").unwrap();

        assert_eq!(lowest_common_ancestor(&graph, b, d), None);
    }
}
