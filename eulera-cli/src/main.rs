//! Eulera CLI - De Bruijn graph assembly from the command line.
//!
//! Loads reads from a FASTA/FASTQ file, builds the De Bruijn graph, and
//! either assembles it into a single sequence or reports its degree
//! statistics.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use eulera_core::Summarizable;
use eulera_seq::{build_sharded, read_sequences, DeBruijnGraph};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::Overrides;

/// Assemble reads by walking an Eulerian path through a De Bruijn graph.
#[derive(Parser)]
#[command(name = "eulera")]
#[command(author, version)]
#[command(about = "Assemble reads by walking an Eulerian path through a De Bruijn graph")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Options shared by every command that builds a graph.
#[derive(Args)]
struct GraphArgs {
    /// FASTA or FASTQ file of reads (gzip accepted)
    reads: PathBuf,

    /// k-mer length (overrides the config file)
    #[arg(short = 'k', long = "kmer-size")]
    k: Option<usize>,

    /// Record each distinct k-mer once instead of once per occurrence
    #[arg(long)]
    distinct: bool,

    /// Uppercase reads before decomposition
    #[arg(long)]
    uppercase: bool,

    /// TOML file with an [assembly] section
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Split ingestion into this many chunks
    #[arg(long, default_value = "1")]
    shards: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the reads into a single sequence
    Assemble {
        #[command(flatten)]
        graph: GraphArgs,

        /// Emit a FASTA record with this header instead of a bare sequence
        #[arg(long)]
        fasta_header: Option<String>,

        /// FASTA line width (0 disables wrapping)
        #[arg(long, default_value = "80")]
        line_width: usize,
    },

    /// Print node, edge and degree-imbalance counts for the graph
    Stats {
        #[command(flatten)]
        graph: GraphArgs,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn build_graph(args: &GraphArgs) -> Result<DeBruijnGraph> {
    let overrides = Overrides {
        k: args.k,
        distinct: args.distinct,
        uppercase: args.uppercase,
    };
    let config = config::resolve(args.config.as_deref(), &overrides)?;
    let reads = read_sequences(&args.reads)
        .with_context(|| format!("failed to load reads from {}", args.reads.display()))?;
    info!(
        reads = reads.len(),
        k = config.k,
        shards = args.shards,
        "building graph"
    );
    let graph = build_sharded(&reads, &config, args.shards)?;
    Ok(graph)
}

/// Render `sequence` as a FASTA record wrapped at `line_width` bases.
fn format_fasta(header: &str, sequence: &[u8], line_width: usize) -> String {
    let mut out = format!(">{}\n", header);
    if sequence.is_empty() {
        return out;
    }
    let width = if line_width == 0 {
        sequence.len()
    } else {
        line_width
    };
    for line in sequence.chunks(width) {
        out.push_str(&String::from_utf8_lossy(line));
        out.push('\n');
    }
    out
}

fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Assemble {
            graph,
            fasta_header,
            line_width,
        } => {
            let graph = build_graph(&graph)?;
            let sequence = graph.assemble().context("assembly failed")?;
            match fasta_header {
                Some(header) => write!(out, "{}", format_fasta(&header, &sequence, line_width))?,
                None => writeln!(out, "{}", String::from_utf8_lossy(&sequence))?,
            }
        }
        Commands::Stats { graph, json } => {
            let summary = build_graph(&graph)?.summary();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
            } else {
                writeln!(out, "{}", summary.summary())?;
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_assemble_flags() {
        let cli = Cli::try_parse_from([
            "eulera", "assemble", "reads.fa", "-k", "21", "--distinct", "--shards", "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Assemble { graph, line_width, .. } => {
                assert_eq!(graph.k, Some(21));
                assert!(graph.distinct);
                assert_eq!(graph.shards, 4);
                assert_eq!(line_width, 80);
            }
            Commands::Stats { .. } => panic!("expected assemble"),
        }
    }

    #[test]
    fn fasta_wrapping() {
        assert_eq!(format_fasta("contig", b"ACGTACGT", 3), ">contig\nACG\nTAC\nGT\n");
        assert_eq!(format_fasta("contig", b"ACGT", 0), ">contig\nACGT\n");
        assert_eq!(format_fasta("empty", b"", 80), ">empty\n");
    }

    #[test]
    fn build_graph_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ">r1\nATGGC\n>r2\nTGGCG\n>r3\nGGCGT\n>r4\nGCGTA").unwrap();
        file.flush().unwrap();

        let args = GraphArgs {
            reads: file.path().to_path_buf(),
            k: Some(4),
            distinct: true,
            uppercase: false,
            config: None,
            shards: 2,
        };
        let graph = build_graph(&args).unwrap();
        assert_eq!(graph.assemble().unwrap(), b"ATGGCGTA");
    }
}
