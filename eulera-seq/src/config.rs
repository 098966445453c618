//! Assembly parameters.

use eulera_core::{EuleraError, Result};

/// How repeated k-mers are recorded in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KmerMode {
    /// Every k-mer occurrence becomes its own parallel edge (default).
    #[default]
    Multiplicity,
    /// Only the first occurrence of each distinct k-mer becomes an edge.
    ///
    /// Useful when reads overlap by more than k-1 bases, so that the same
    /// k-mer is sampled by several reads without being repeated in the genome.
    Distinct,
}

/// Parameters for De Bruijn graph construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct AssemblyConfig {
    /// k-mer length; nodes are (k-1)-mers (default: 31).
    pub k: usize,
    /// Repeated k-mer policy (default: [`KmerMode::Multiplicity`]).
    pub kmer_mode: KmerMode,
    /// Fold read bytes to ASCII uppercase before decomposition (default: false).
    pub uppercase: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            k: 31,
            kmer_mode: KmerMode::Multiplicity,
            uppercase: false,
        }
    }
}

impl AssemblyConfig {
    /// Default configuration with the given k.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Builder-style setter for [`KmerMode`].
    pub fn with_kmer_mode(mut self, kmer_mode: KmerMode) -> Self {
        self.kmer_mode = kmer_mode;
        self
    }

    /// Builder-style setter for case folding.
    pub fn with_uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    /// Check that the parameters describe a buildable graph.
    ///
    /// # Errors
    ///
    /// Returns an error if `k < 1`.
    pub fn validate(&self) -> Result<()> {
        if self.k < 1 {
            return Err(EuleraError::InvalidInput(format!(
                "k must be at least 1, got {}",
                self.k
            )));
        }
        Ok(())
    }
}
