//! Read decomposition into De Bruijn edges.
//!
//! Each length-`k` window of a read is one k-mer; the k-mer connects its
//! (k-1)-prefix to its (k-1)-suffix. Reads shorter than `k` contribute
//! nothing.

use eulera_core::{EuleraError, Result};

/// One k-mer occurrence viewed as a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KmerEdge<'a> {
    kmer: &'a [u8],
}

impl<'a> KmerEdge<'a> {
    /// The full k-mer.
    pub fn kmer(&self) -> &'a [u8] {
        self.kmer
    }

    /// The (k-1)-mer the edge leaves from.
    pub fn prefix(&self) -> &'a [u8] {
        &self.kmer[..self.kmer.len() - 1]
    }

    /// The (k-1)-mer the edge arrives at.
    pub fn suffix(&self) -> &'a [u8] {
        &self.kmer[1..]
    }

    /// The final base of the k-mer, i.e. the base the edge adds when spelled.
    pub fn symbol(&self) -> u8 {
        self.kmer[self.kmer.len() - 1]
    }

    /// Split into `(prefix, suffix)`.
    pub fn into_pair(self) -> (&'a [u8], &'a [u8]) {
        (self.prefix(), self.suffix())
    }
}

/// Left-to-right iterator over the k-mer edges of a read.
///
/// Yields exactly `len - k + 1` edges for a read of length `len >= k` and
/// none otherwise.
#[derive(Debug, Clone)]
pub struct KmerEdges<'a> {
    inner: std::slice::Windows<'a, u8>,
    remaining: usize,
}

impl<'a> KmerEdges<'a> {
    /// Create an edge iterator over `read`.
    ///
    /// # Errors
    ///
    /// Returns an error if `k == 0`.
    pub fn new(read: &'a [u8], k: usize) -> Result<Self> {
        if k == 0 {
            return Err(EuleraError::InvalidInput(
                "k-mer size must be at least 1".into(),
            ));
        }
        Ok(Self::windows(read, k))
    }

    /// Caller guarantees `k >= 1`.
    pub(crate) fn windows(read: &'a [u8], k: usize) -> Self {
        debug_assert!(k >= 1);
        Self {
            inner: read.windows(k),
            remaining: kmer_count(read.len(), k),
        }
    }
}

impl<'a> Iterator for KmerEdges<'a> {
    type Item = KmerEdge<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let kmer = self.inner.next()?;
        self.remaining -= 1;
        Some(KmerEdge { kmer })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> ExactSizeIterator for KmerEdges<'a> {}

/// Decompose `read` into its `(prefix, suffix)` edges, left to right.
///
/// ```
/// use eulera_seq::extract_edges;
///
/// let pairs: Vec<_> = extract_edges(b"ACGT", 3)
///     .unwrap()
///     .map(|e| e.into_pair())
///     .collect();
/// assert_eq!(pairs, vec![(&b"AC"[..], &b"CG"[..]), (&b"CG"[..], &b"GT"[..])]);
/// ```
///
/// # Errors
///
/// Returns an error if `k == 0`.
pub fn extract_edges(read: &[u8], k: usize) -> Result<KmerEdges<'_>> {
    KmerEdges::new(read, k)
}

/// Number of k-mers in a read of length `len`.
pub fn kmer_count(len: usize, k: usize) -> usize {
    if k == 0 || len < k {
        0
    } else {
        len - k + 1
    }
}
