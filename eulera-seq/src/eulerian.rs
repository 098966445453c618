//! Eulerian path extraction with Hierholzer's algorithm.
//!
//! The traversal works on a private per-node cursor over each edge list, so
//! the graph itself, including its degree tables, is untouched and stays
//! queryable after assembly.
//!
//! # Algorithm
//!
//! 1. **Connectivity check** — union-find over the edges, ignoring direction.
//!    Every edge must lie in the start node's component.
//! 2. **Balance check** — one pass over the nodes. At most one node may have
//!    `out - in == 1` (the start), at most one `in - out == 1` (the end), and
//!    every other node must be balanced. The start is the first source if
//!    there is one, otherwise the first-inserted node with outgoing edges.
//! 3. **Walk** — an explicit stack. While the top node has unconsumed edges,
//!    take its most recently inserted one and push the target; otherwise pop
//!    the node onto the finished list. Reversing the finished list gives the
//!    path.
//! 4. **Coverage check** — every edge must have been consumed.
//!
//! # Example
//!
//! ```
//! use eulera_seq::{DeBruijnGraph, find_eulerian_path};
//!
//! let mut graph = DeBruijnGraph::new(3).unwrap();
//! graph.add_read(b"ACGTT");
//! let path = find_eulerian_path(&graph).unwrap();
//! let labels: Vec<&[u8]> = path.labels().collect();
//! assert_eq!(labels, vec![&b"AC"[..], &b"CG"[..], &b"GT"[..], &b"TT"[..]]);
//! ```

use eulera_core::{EuleraError, Result};
use tracing::{debug, warn};

use crate::debruijn::{DeBruijnGraph, NodeId};

/// An ordered walk through a [`DeBruijnGraph`].
#[derive(Debug, Clone)]
pub struct EulerianPath<'g> {
    graph: &'g DeBruijnGraph,
    nodes: Vec<NodeId>,
    /// Base added by each step; `symbols[i]` is the edge from `nodes[i]` to `nodes[i + 1]`.
    symbols: Vec<u8>,
}

impl<'g> EulerianPath<'g> {
    /// The graph this path walks.
    pub fn graph(&self) -> &'g DeBruijnGraph {
        self.graph
    }

    /// Visited nodes in walk order; one more than the number of edges.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Labels of the visited nodes in walk order.
    pub fn labels(&self) -> impl Iterator<Item = &'g [u8]> + '_ {
        let graph = self.graph;
        self.nodes.iter().map(move |&id| graph.label(id))
    }

    /// Bases spelled by each traversed edge.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Number of nodes on the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the path visits no node, as for a graph without edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of traversed edges.
    pub fn edge_count(&self) -> usize {
        self.symbols.len()
    }
}

/// Validate `graph` and pick the node a walk starts at.
///
/// Returns `Ok(None)` for a graph without edges.
///
/// # Errors
///
/// Returns [`EuleraError::DisconnectedGraph`] if the edges fall into more than
/// one weakly connected component; `consumed` is then the number of edges in
/// the start node's component. Otherwise returns
/// [`EuleraError::UnbalancedGraph`] if any node has `|out - in| > 1`, or if
/// more than one node is a source or more than one a sink.
pub fn find_start_node(graph: &DeBruijnGraph) -> Result<Option<NodeId>> {
    let Some(first) = graph.node_ids().find(|&id| graph.out_degree(id) > 0) else {
        return Ok(None);
    };

    let mut source: Option<NodeId> = None;
    let mut overloaded: Option<(NodeId, isize)> = None;
    let mut n_sources = 0usize;
    let mut n_sinks = 0usize;

    for id in graph.node_ids() {
        match graph.degree_imbalance(id) {
            0 => {}
            1 => {
                n_sources += 1;
                source.get_or_insert(id);
            }
            -1 => n_sinks += 1,
            d => {
                overloaded.get_or_insert((id, d));
            }
        }
    }

    let start = source.unwrap_or(first);
    check_connected(graph, start)?;

    if let Some((id, d)) = overloaded {
        let summary = graph.summary();
        warn!(node = %String::from_utf8_lossy(graph.label(id)), imbalance = d, "no Eulerian path");
        return Err(EuleraError::UnbalancedGraph {
            sources: summary.sources,
            sinks: summary.sinks,
            detail: format!(
                "node {} has out-degree {} and in-degree {}",
                String::from_utf8_lossy(graph.label(id)),
                graph.out_degree(id),
                graph.in_degree(id)
            ),
        });
    }

    if n_sources > 1 || n_sinks > 1 {
        warn!(sources = n_sources, sinks = n_sinks, "no Eulerian path");
        return Err(EuleraError::UnbalancedGraph {
            sources: n_sources,
            sinks: n_sinks,
            detail: "an Eulerian path allows at most one source and one sink".into(),
        });
    }

    Ok(Some(start))
}

/// Fail unless every edge is in the same weakly connected component as `start`.
fn check_connected(graph: &DeBruijnGraph, start: NodeId) -> Result<()> {
    let mut parent: Vec<usize> = (0..graph.node_count()).collect();
    for id in graph.node_ids() {
        for edge in graph.edges(id) {
            let a = find_root(&mut parent, id.index());
            let b = find_root(&mut parent, edge.target.index());
            if a != b {
                parent[b] = a;
            }
        }
    }

    let root = find_root(&mut parent, start.index());
    let mut reachable = 0usize;
    for id in graph.node_ids() {
        if find_root(&mut parent, id.index()) == root {
            reachable += graph.out_degree(id);
        }
    }

    let total = graph.edge_count();
    if reachable < total {
        warn!(reachable, total, "edges span more than one component");
        return Err(EuleraError::DisconnectedGraph {
            consumed: reachable,
            total,
        });
    }
    Ok(())
}

fn find_root(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        // path halving
        parent[node] = parent[parent[node]];
        node = parent[node];
    }
    node
}

/// Find a walk that uses every edge of `graph` exactly once.
///
/// An empty graph yields an empty path.
///
/// # Errors
///
/// Returns the errors of [`find_start_node`], and
/// [`EuleraError::DisconnectedGraph`] if the walk leaves edges unconsumed.
pub fn find_eulerian_path(graph: &DeBruijnGraph) -> Result<EulerianPath<'_>> {
    let Some(start) = find_start_node(graph)? else {
        return Ok(EulerianPath {
            graph,
            nodes: Vec::new(),
            symbols: Vec::new(),
        });
    };
    debug!(start = %String::from_utf8_lossy(graph.label(start)), "walking graph");

    let total = graph.edge_count();
    // Unconsumed edges per node; edges are taken from the back of each list.
    let mut remaining: Vec<usize> = graph.node_ids().map(|id| graph.out_degree(id)).collect();
    let mut stack: Vec<(NodeId, Option<u8>)> = vec![(start, None)];
    let mut finished: Vec<(NodeId, Option<u8>)> = Vec::with_capacity(total + 1);
    let mut consumed = 0usize;

    while let Some(&(node, _)) = stack.last() {
        let left = &mut remaining[node.index()];
        if *left > 0 {
            *left -= 1;
            let edge = graph.edges(node)[*left];
            consumed += 1;
            stack.push((edge.target, Some(edge.symbol)));
        } else if let Some(step) = stack.pop() {
            finished.push(step);
        }
    }

    if consumed < total {
        warn!(consumed, total, "traversal left edges unvisited");
        return Err(EuleraError::DisconnectedGraph { consumed, total });
    }

    finished.reverse();
    let nodes = finished.iter().map(|&(id, _)| id).collect();
    let symbols = finished.iter().filter_map(|&(_, s)| s).collect();
    debug!(nodes = finished.len(), edges = consumed, "Eulerian path found");

    Ok(EulerianPath {
        graph,
        nodes,
        symbols,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AssemblyConfig, KmerMode};

    fn graph_from(reads: &[&str], k: usize) -> DeBruijnGraph {
        let mut graph = DeBruijnGraph::new(k).unwrap();
        graph.add_reads(reads);
        graph
    }

    fn label_strings(path: &EulerianPath<'_>) -> Vec<String> {
        path.labels()
            .map(|l| String::from_utf8_lossy(l).into_owned())
            .collect()
    }

    #[test]
    fn empty_graph_has_no_start() {
        let graph = DeBruijnGraph::new(3).unwrap();
        assert_eq!(find_start_node(&graph).unwrap(), None);
        let path = find_eulerian_path(&graph).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.edge_count(), 0);
    }

    #[test]
    fn start_is_unbalanced_source() {
        // CC is inserted first but the walk must begin at the source AC.
        let graph = graph_from(&["CCA", "ACC"], 3);
        let start = find_start_node(&graph).unwrap().unwrap();
        assert_eq!(graph.label(start), b"AC");
        let path = find_eulerian_path(&graph).unwrap();
        assert_eq!(label_strings(&path), vec!["AC", "CC", "CA"]);
    }

    #[test]
    fn circuit_starts_at_first_inserted_node() {
        // CG → GT → TA → AC → CG, every node balanced.
        let graph = graph_from(&["CGTAC", "ACG"], 3);
        let start = find_start_node(&graph).unwrap().unwrap();
        assert_eq!(graph.label(start), b"CG");
        let path = find_eulerian_path(&graph).unwrap();
        assert_eq!(label_strings(&path), vec!["CG", "GT", "TA", "AC", "CG"]);
    }

    #[test]
    fn cyclic_reads_multiplicity() {
        // Every k-mer is sampled twice → 8 parallel edges around a 4-cycle.
        let graph = graph_from(&["ACGT", "CGTA", "GTAC", "TACG"], 3);
        assert_eq!(graph.edge_count(), 8);
        let path = find_eulerian_path(&graph).unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path.labels().next(), Some(&b"AC"[..]));
    }

    #[test]
    fn cyclic_reads_distinct() {
        let config = AssemblyConfig::new(3).with_kmer_mode(KmerMode::Distinct);
        let mut graph = DeBruijnGraph::with_config(config).unwrap();
        graph.add_reads(["ACGT", "CGTA", "GTAC", "TACG"]);
        let path = find_eulerian_path(&graph).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(label_strings(&path), vec!["AC", "CG", "GT", "TA", "AC"]);
    }

    #[test]
    fn parallel_edges_taken_newest_first() {
        // AA has two self-loops then AA → AC; the walk still covers all three.
        let graph = graph_from(&["AAAC"], 2);
        let path = find_eulerian_path(&graph).unwrap();
        assert_eq!(path.edge_count(), graph.edge_count());
        assert_eq!(path.symbols(), b"AAC");
    }

    #[test]
    fn branch_then_return() {
        // AT is left twice; its newer edge AT → TC is taken first and the
        // AT → TG → GG → GA → AT loop is spliced in front of it.
        let graph = graph_from(&["ATGGATC"], 3);
        let path = find_eulerian_path(&graph).unwrap();
        assert_eq!(path.edge_count(), 5);
        assert_eq!(path.len(), 6);
        assert_eq!(path.labels().next(), Some(&b"AT"[..]));
        assert_eq!(path.labels().last(), Some(&b"TC"[..]));
    }

    #[test]
    fn three_imbalanced_nodes_rejected() {
        // AC branches to CG and CT: AC is +2, CG and CT are sinks.
        let graph = graph_from(&["ACG", "ACT"], 3);
        let err = find_eulerian_path(&graph).unwrap_err();
        assert!(matches!(err, EuleraError::UnbalancedGraph { .. }));
    }

    #[test]
    fn two_sources_in_one_component_rejected() {
        // AC → CG → GT and CC → CG → GA meet at CG: connected, but with two
        // sources and two sinks.
        let graph = graph_from(&["ACGT", "CCGA"], 3);
        let err = find_start_node(&graph).unwrap_err();
        match err {
            EuleraError::UnbalancedGraph { sources, sinks, .. } => {
                assert_eq!(sources, 2);
                assert_eq!(sinks, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn disjoint_linear_reads_disconnected() {
        // AA → AC → CC and GG → GT → TT share no 2-mer.
        let graph = graph_from(&["AACC", "GGTT"], 3);
        let err = find_start_node(&graph).unwrap_err();
        match err {
            EuleraError::DisconnectedGraph { consumed, total } => {
                assert_eq!(consumed, 2);
                assert_eq!(total, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn disjoint_reads_with_loops_disconnected() {
        let graph = graph_from(&["AAAC", "GGGT"], 3);
        let err = find_eulerian_path(&graph).unwrap_err();
        assert!(matches!(
            err,
            EuleraError::DisconnectedGraph {
                consumed: 2,
                total: 4
            }
        ));
    }

    #[test]
    fn disconnection_reported_before_overloaded_node() {
        // ACG/ACT alone is unbalanced; the detached TTGG makes it disconnected.
        let graph = graph_from(&["ACG", "ACT", "TTGG"], 3);
        let err = find_eulerian_path(&graph).unwrap_err();
        assert!(matches!(
            err,
            EuleraError::DisconnectedGraph {
                consumed: 2,
                total: 4
            }
        ));
    }

    #[test]
    fn disconnected_cycles_rejected() {
        // Two balanced cycles sharing no 2-mer.
        let graph = graph_from(&["ACGTAC", "CCTCC"], 3);
        let err = find_eulerian_path(&graph).unwrap_err();
        match err {
            EuleraError::DisconnectedGraph { consumed, total } => {
                assert_eq!(total, 7);
                assert_eq!(consumed, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn path_plus_detached_cycle_rejected() {
        let graph = graph_from(&["ATGGCGTA", "CCTCC"], 3);
        let err = find_eulerian_path(&graph).unwrap_err();
        match err {
            EuleraError::DisconnectedGraph { consumed, total } => {
                assert_eq!(consumed, 6);
                assert_eq!(total, 9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn graph_untouched_after_walk() {
        let graph = graph_from(&["ATGGCGTA"], 3);
        let before = graph.summary();
        find_eulerian_path(&graph).unwrap();
        find_eulerian_path(&graph).unwrap();
        assert_eq!(graph.summary(), before);
    }
}
