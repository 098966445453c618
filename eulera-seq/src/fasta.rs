//! FASTA/FASTQ read loading.

use std::fs::File;
use std::path::Path;

use eulera_core::{EuleraError, Result};
use needletail::parse_fastx_reader;
use tracing::debug;

/// Load every record of a FASTA or FASTQ file (optionally gzipped), in file
/// order, as raw sequence bytes. Multi-line FASTA records are joined.
///
/// # Errors
///
/// [`EuleraError::Io`] if the file cannot be opened, [`EuleraError::Parse`]
/// if its contents are not valid FASTA/FASTQ.
pub fn read_sequences(path: impl AsRef<Path>) -> Result<Vec<Vec<u8>>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = parse_fastx_reader(file).map_err(|e| EuleraError::Parse(e.to_string()))?;

    let mut reads = Vec::new();
    while let Some(record) = reader.next() {
        let record = record.map_err(|e| EuleraError::Parse(e.to_string()))?;
        reads.push(record.seq().into_owned());
    }

    debug!(path = %path.display(), reads = reads.len(), "reads loaded");
    Ok(reads)
}
