#![no_main]
use eulera_seq::{AssemblyConfig, DeBruijnGraph, KmerMode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&params, rest)) = data.split_first() else {
        return;
    };
    let k = (params & 0x0f) as usize + 1;
    let mode = if params & 0x10 == 0 {
        KmerMode::Multiplicity
    } else {
        KmerMode::Distinct
    };
    let mut graph = DeBruijnGraph::with_config(AssemblyConfig::new(k).with_kmer_mode(mode)).unwrap();
    graph.add_reads(rest.split(|&b| b == b'\n'));
    if let Ok(sequence) = graph.assemble() {
        if !graph.is_empty() {
            assert_eq!(sequence.len(), (k - 1) + graph.edge_count());
        }
    }
});
