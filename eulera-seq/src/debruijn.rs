//! De Bruijn multigraph construction.
//!
//! Nodes are (k-1)-mers stored in an arena in first-seen order; each k-mer
//! occurrence appends one edge to its prefix node's outgoing list. Insertion
//! order is part of the graph's identity: it decides the start node of a
//! circuit and the order in which parallel edges are walked, so two graphs
//! built from the same reads in the same order always assemble identically.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use eulera_core::{EuleraError, Result, Summarizable};
use tracing::{debug, trace};

use crate::config::{AssemblyConfig, KmerMode};
use crate::kmer::{KmerEdge, KmerEdges};

/// Index of a node in a [`DeBruijnGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed edge leaving some node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// The suffix node the edge arrives at.
    pub target: NodeId,
    /// Final base of the k-mer this edge stands for.
    pub symbol: u8,
}

#[derive(Debug, Clone)]
struct Node {
    label: Vec<u8>,
    edges: Vec<Edge>,
    in_degree: usize,
}

/// A De Bruijn multigraph over (k-1)-mers.
///
/// `out_degree(n)` is always the length of `n`'s edge list and `in_degree(n)`
/// always the number of edges targeting `n`; both are maintained as edges are
/// appended and never decrease.
#[derive(Debug, Clone)]
pub struct DeBruijnGraph {
    config: AssemblyConfig,
    nodes: Vec<Node>,
    index: HashMap<Vec<u8>, NodeId>,
    edge_count: usize,
    /// K-mers already recorded; only populated in [`KmerMode::Distinct`].
    seen: HashSet<Vec<u8>>,
}

/// Degree statistics for a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSummary {
    pub k: usize,
    pub nodes: usize,
    pub edges: usize,
    /// Nodes with `out - in == 1`.
    pub sources: usize,
    /// Nodes with `in - out == 1`.
    pub sinks: usize,
    /// Nodes with `|out - in| > 1`.
    pub unbalanced: usize,
}

impl Summarizable for GraphSummary {
    fn summary(&self) -> String {
        format!(
            "k={} nodes={} edges={} sources={} sinks={} unbalanced={}",
            self.k, self.nodes, self.edges, self.sources, self.sinks, self.unbalanced
        )
    }
}

impl DeBruijnGraph {
    /// Create an empty graph with default parameters and the given `k`.
    ///
    /// # Errors
    ///
    /// Returns an error if `k < 1`.
    pub fn new(k: usize) -> Result<Self> {
        Self::with_config(AssemblyConfig::new(k))
    }

    /// Create an empty graph from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails [`AssemblyConfig::validate`].
    pub fn with_config(config: AssemblyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            nodes: Vec::new(),
            index: HashMap::new(),
            edge_count: 0,
            seen: HashSet::new(),
        })
    }

    /// The k-mer length.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// The parameters the graph was built with.
    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// Add every k-mer of `read` as an edge. Reads shorter than `k` are ignored.
    pub fn add_read(&mut self, read: impl AsRef<[u8]>) {
        let read = read.as_ref();
        let read: Cow<'_, [u8]> = if self.config.uppercase {
            Cow::Owned(read.to_ascii_uppercase())
        } else {
            Cow::Borrowed(read)
        };
        let mut added = 0usize;
        for edge in KmerEdges::windows(&read, self.config.k) {
            if self.add_edge(edge) {
                added += 1;
            }
        }
        trace!(len = read.len(), added, "read ingested");
    }

    /// Add each read in order; equivalent to repeated [`add_read`](Self::add_read).
    pub fn add_reads<I, R>(&mut self, reads: I)
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let before = self.edge_count;
        let mut n_reads = 0usize;
        for read in reads {
            self.add_read(read);
            n_reads += 1;
        }
        debug!(
            reads = n_reads,
            edges_added = self.edge_count - before,
            nodes = self.nodes.len(),
            "reads ingested"
        );
    }

    fn add_edge(&mut self, edge: KmerEdge<'_>) -> bool {
        if self.config.kmer_mode == KmerMode::Distinct && !self.seen.insert(edge.kmer().to_vec())
        {
            return false;
        }
        let from = self.intern(edge.prefix());
        let to = self.intern(edge.suffix());
        self.push_edge(from, to, edge.symbol());
        true
    }

    fn push_edge(&mut self, from: NodeId, to: NodeId, symbol: u8) {
        self.nodes[from.0].edges.push(Edge { target: to, symbol });
        self.nodes[to.0].in_degree += 1;
        self.edge_count += 1;
    }

    fn intern(&mut self, label: &[u8]) -> NodeId {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            label: label.to_vec(),
            edges: Vec::new(),
            in_degree: 0,
        });
        self.index.insert(label.to_vec(), id);
        id
    }

    /// Fold `other` into this graph as if its reads had been added after ours.
    ///
    /// Nodes new to this graph are appended in `other`'s insertion order and
    /// each node's edges keep their relative order, so merging per-chunk graphs
    /// in chunk order reproduces sequential ingestion exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the two graphs were built with different parameters.
    pub fn merge(&mut self, other: DeBruijnGraph) -> Result<()> {
        if other.config != self.config {
            return Err(EuleraError::InvalidInput(format!(
                "cannot merge graphs with different parameters ({:?} vs {:?})",
                self.config, other.config
            )));
        }
        let before = self.edge_count;
        let remap: Vec<NodeId> = other.nodes.iter().map(|n| self.intern(&n.label)).collect();
        for (node, &from) in other.nodes.iter().zip(&remap) {
            for edge in &node.edges {
                if self.config.kmer_mode == KmerMode::Distinct {
                    let mut kmer = Vec::with_capacity(node.label.len() + 1);
                    kmer.extend_from_slice(&node.label);
                    kmer.push(edge.symbol);
                    if !self.seen.insert(kmer) {
                        continue;
                    }
                }
                self.push_edge(from, remap[edge.target.0], edge.symbol);
            }
        }
        debug!(
            edges_added = self.edge_count - before,
            nodes = self.nodes.len(),
            "graph merged"
        );
        Ok(())
    }

    /// Number of distinct (k-1)-mer nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether no edge has been added yet.
    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Node labels in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.nodes.iter().map(|n| n.label.as_slice())
    }

    /// Look up a node by its (k-1)-mer.
    pub fn node_id(&self, label: &[u8]) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    // The accessors below index the arena directly and panic on an id taken
    // from a different graph.

    /// The (k-1)-mer of a node.
    pub fn label(&self, id: NodeId) -> &[u8] {
        &self.nodes[id.0].label
    }

    /// Number of edges arriving at a node.
    pub fn in_degree(&self, id: NodeId) -> usize {
        self.nodes[id.0].in_degree
    }

    /// Number of edges leaving a node.
    pub fn out_degree(&self, id: NodeId) -> usize {
        self.nodes[id.0].edges.len()
    }

    /// `out_degree - in_degree`.
    pub fn degree_imbalance(&self, id: NodeId) -> isize {
        self.out_degree(id) as isize - self.in_degree(id) as isize
    }

    /// Outgoing edges in insertion order.
    pub fn edges(&self, id: NodeId) -> &[Edge] {
        &self.nodes[id.0].edges
    }

    /// Labels of the successors of a node, one per edge, in insertion order.
    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = &[u8]> + '_ {
        self.nodes[id.0]
            .edges
            .iter()
            .map(move |e| self.nodes[e.target.0].label.as_slice())
    }

    /// How many edges stand for `kmer`.
    pub fn kmer_multiplicity(&self, kmer: &[u8]) -> usize {
        if kmer.len() != self.config.k {
            return 0;
        }
        let prefix = &kmer[..kmer.len() - 1];
        let suffix = &kmer[1..];
        let symbol = kmer[kmer.len() - 1];
        match (self.node_id(prefix), self.node_id(suffix)) {
            (Some(from), Some(to)) => self
                .edges(from)
                .iter()
                .filter(|e| e.target == to && e.symbol == symbol)
                .count(),
            _ => 0,
        }
    }

    /// Check whether a specific k-mer exists as an edge in the graph.
    pub fn contains_kmer(&self, kmer: &[u8]) -> bool {
        self.kmer_multiplicity(kmer) > 0
    }

    /// Degree statistics over all nodes.
    pub fn summary(&self) -> GraphSummary {
        let mut summary = GraphSummary {
            k: self.config.k,
            nodes: self.nodes.len(),
            edges: self.edge_count,
            sources: 0,
            sinks: 0,
            unbalanced: 0,
        };
        for id in self.node_ids() {
            match self.degree_imbalance(id) {
                0 => {}
                1 => summary.sources += 1,
                -1 => summary.sinks += 1,
                _ => summary.unbalanced += 1,
            }
        }
        summary
    }

    /// Find an Eulerian path and spell it out as a sequence.
    ///
    /// Returns an empty sequence for a graph without edges.
    ///
    /// # Errors
    ///
    /// Returns [`EuleraError::UnbalancedGraph`] if the degree imbalance rules
    /// out an Eulerian path, or [`EuleraError::DisconnectedGraph`] if the edges
    /// span more than one component.
    pub fn assemble(&self) -> Result<Vec<u8>> {
        let path = crate::eulerian::find_eulerian_path(self)?;
        Ok(crate::reconstruct::reconstruct(&path))
    }
}
