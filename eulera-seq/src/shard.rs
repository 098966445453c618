//! Chunked graph construction.
//!
//! Reads are split into contiguous chunks and each chunk is decomposed into
//! its own [`DeBruijnGraph`]. With the `parallel` feature the chunks are
//! built on rayon workers. The chunk graphs are then merged one after another
//! in chunk order, which is the only point where they meet; the result is
//! identical to adding every read to a single graph in order.

use eulera_core::{EuleraError, Result};
use tracing::debug;

use crate::config::AssemblyConfig;
use crate::debruijn::DeBruijnGraph;

fn build_shard<R: AsRef<[u8]>>(reads: &[R], config: &AssemblyConfig) -> Result<DeBruijnGraph> {
    let mut graph = DeBruijnGraph::with_config(config.clone())?;
    graph.add_reads(reads);
    Ok(graph)
}

/// Build a graph from `reads` using up to `n_shards` independent chunks.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or `n_shards == 0`.
pub fn build_sharded<R>(
    reads: &[R],
    config: &AssemblyConfig,
    n_shards: usize,
) -> Result<DeBruijnGraph>
where
    R: AsRef<[u8]> + Sync,
{
    config.validate()?;
    if n_shards == 0 {
        return Err(EuleraError::InvalidInput(
            "at least one shard is required".into(),
        ));
    }
    let chunk_size = reads.len().div_ceil(n_shards).max(1);

    #[cfg(feature = "parallel")]
    let shards: Vec<DeBruijnGraph> = {
        use rayon::prelude::*;
        reads
            .par_chunks(chunk_size)
            .map(|chunk| build_shard(chunk, config))
            .collect::<Result<_>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let shards: Vec<DeBruijnGraph> = reads
        .chunks(chunk_size)
        .map(|chunk| build_shard(chunk, config))
        .collect::<Result<_>>()?;

    let n_built = shards.len();
    let mut shards = shards.into_iter();
    let mut graph = match shards.next() {
        Some(first) => first,
        None => DeBruijnGraph::with_config(config.clone())?,
    };
    for shard in shards {
        graph.merge(shard)?;
    }
    debug!(
        shards = n_built,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "sharded build complete"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KmerMode;

    fn assert_same_graph(a: &DeBruijnGraph, b: &DeBruijnGraph) {
        assert_eq!(a.nodes().collect::<Vec<_>>(), b.nodes().collect::<Vec<_>>());
        assert_eq!(a.edge_count(), b.edge_count());
        for id in a.node_ids() {
            assert_eq!(a.edges(id), b.edges(id));
            assert_eq!(a.in_degree(id), b.in_degree(id));
        }
    }

    #[test]
    fn sharded_matches_sequential() {
        let reads = ["ATGGC", "TGGCG", "GGCGT", "GCGTA", "CGTAA", "GTAAT"];
        let config = AssemblyConfig::new(4);
        let mut sequential = DeBruijnGraph::with_config(config.clone()).unwrap();
        sequential.add_reads(reads);
        for n in 1..=8 {
            let sharded = build_sharded(&reads, &config, n).unwrap();
            assert_same_graph(&sharded, &sequential);
        }
    }

    #[test]
    fn sharded_distinct_matches_sequential() {
        let reads = ["ACGT", "CGTA", "GTAC", "TACG"];
        let config = AssemblyConfig::new(3).with_kmer_mode(KmerMode::Distinct);
        let mut sequential = DeBruijnGraph::with_config(config.clone()).unwrap();
        sequential.add_reads(reads);
        let sharded = build_sharded(&reads, &config, 3).unwrap();
        assert_same_graph(&sharded, &sequential);
        assert_eq!(sharded.assemble().unwrap(), sequential.assemble().unwrap());
    }

    #[test]
    fn no_reads_gives_empty_graph() {
        let reads: [&str; 0] = [];
        let graph = build_sharded(&reads, &AssemblyConfig::new(3), 4).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.k(), 3);
    }

    #[test]
    fn zero_shards_rejected() {
        assert!(build_sharded(&["ACGT"], &AssemblyConfig::new(3), 0).is_err());
    }

    #[test]
    fn invalid_k_rejected() {
        assert!(build_sharded(&["ACGT"], &AssemblyConfig::new(0), 2).is_err());
    }
}
