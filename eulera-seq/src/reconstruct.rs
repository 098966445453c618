//! Spelling a node path back into a sequence.

use crate::eulerian::EulerianPath;

/// Spell the sequence an Eulerian path walks.
///
/// The first node contributes its whole (k-1)-mer and each traversed edge
/// its final base, so the result is `(k-1) + edge_count` bases long. An empty
/// path spells an empty sequence.
pub fn reconstruct(path: &EulerianPath<'_>) -> Vec<u8> {
    let Some(first) = path.labels().next() else {
        return Vec::new();
    };
    let mut sequence = Vec::with_capacity(first.len() + path.edge_count());
    sequence.extend_from_slice(first);
    sequence.extend_from_slice(path.symbols());
    sequence
}

/// Spell a path given as raw node labels: the first label in full, then the
/// last base of every following label.
///
/// Labels must be non-empty past the first, i.e. `k >= 2`; an empty label
/// contributes nothing. [`reconstruct`] carries edge bases and also handles
/// `k == 1`.
pub fn spell_labels<L: AsRef<[u8]>>(labels: &[L]) -> Vec<u8> {
    let Some((first, rest)) = labels.split_first() else {
        return Vec::new();
    };
    let mut sequence = first.as_ref().to_vec();
    sequence.extend(rest.iter().filter_map(|l| l.as_ref().last().copied()));
    sequence
}
