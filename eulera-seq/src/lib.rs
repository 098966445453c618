//! De Bruijn graph genome assembly for the Eulera workspace.
//!
//! Reads are decomposed into k-mers, each k-mer becomes an edge between its
//! (k-1)-prefix and (k-1)-suffix, and the sequence is recovered by walking an
//! Eulerian path through the resulting multigraph:
//!
//! - **Read ingest** — [`extract_edges`] / [`KmerEdges`]
//! - **Graph building** — [`DeBruijnGraph`] with [`AssemblyConfig`], plus
//!   chunked construction via [`build_sharded`]
//! - **Path finding** — [`find_eulerian_path`] (Hierholzer's algorithm with
//!   balance and connectivity checks)
//! - **Reconstruction** — [`reconstruct`] spells a path as bases
//! - **Read loading** — [`read_sequences`] for FASTA/FASTQ files
//!
//! # Example
//!
//! ```
//! use eulera_seq::DeBruijnGraph;
//!
//! let mut graph = DeBruijnGraph::new(4).unwrap();
//! graph.add_read(b"ATGGCGTA");
//! assert_eq!(graph.assemble().unwrap(), b"ATGGCGTA");
//! ```

pub mod config;
pub mod debruijn;
pub mod eulerian;
pub mod fasta;
pub mod kmer;
pub mod reconstruct;
pub mod shard;

use eulera_core::Result;

// Re-export configuration
pub use config::{AssemblyConfig, KmerMode};

// Re-export graph types
pub use debruijn::{DeBruijnGraph, Edge, GraphSummary, NodeId};

// Re-export path finding and reconstruction
pub use eulerian::{find_eulerian_path, find_start_node, EulerianPath};
pub use reconstruct::{reconstruct, spell_labels};

// Re-export read ingest and loading
pub use fasta::read_sequences;
pub use kmer::{extract_edges, kmer_count, KmerEdge, KmerEdges};
pub use shard::build_sharded;

/// Assemble the sequence spelled by an Eulerian path through `graph`.
///
/// Same as [`DeBruijnGraph::assemble`].
pub fn assemble(graph: &DeBruijnGraph) -> Result<Vec<u8>> {
    graph.assemble()
}

/// Build a graph over `reads` with the given `k` and assemble it.
///
/// # Errors
///
/// Returns an error if `k < 1` or the reads do not admit an Eulerian path.
pub fn assemble_reads<I, R>(reads: I, k: usize) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[u8]>,
{
    let mut graph = DeBruijnGraph::new(k)?;
    graph.add_reads(reads);
    graph.assemble()
}
