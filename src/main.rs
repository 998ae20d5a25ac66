use std::fs;
use std::fs::File;
use std::io::{stderr, stdout, BufReader, BufWriter, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

use debrusta::graph::DebruijnGraph;
use debrusta::io::fasta::write_contigs;
use debrusta::io::fastq::read_sequences;
use debrusta::io::graph::{format_as_dot, write_stats};
use debrusta::io::{load_graph, save_graph};
use debrusta::pipeline::{assemble, AssemblyConfig, DEFAULT_KMER_SIZE};
use debrusta::simplify::DEFAULT_TIE_BREAK_SEED;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct CliArgs {
    /// Set verbosity level. Use multiple times to increase the verbosity level.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: CliSubcommand,
}

#[derive(Subcommand, Debug)]
enum CliSubcommand {
    /// Assemble sequencing reads into contigs
    Assemble(AssembleArgs),

    /// Convert a saved assembly graph to DOT for visualization
    View(ViewArgs),

    /// Print assembly graph statistics as JSON
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct AssembleArgs {
    /// Reads to assemble in FASTQ format. Gzipped input is detected from the file name.
    #[clap(help_heading = "Inputs")]
    reads: PathBuf,

    /// K-mer size
    #[arg(short, long, default_value_t = DEFAULT_KMER_SIZE)]
    #[clap(help_heading = "Assembly configuration")]
    kmer_size: usize,

    /// Seed for the tie-breaking draw between otherwise equal competing paths
    #[arg(long, default_value_t = DEFAULT_TIE_BREAK_SEED)]
    #[clap(help_heading = "Assembly configuration")]
    tie_break_seed: u64,

    /// Output contigs filename in FASTA format. If not given, defaults to stdout
    #[arg(short, long)]
    #[clap(help_heading = "Outputs")]
    output: Option<PathBuf>,

    /// Save the final assembly graph to the given file
    #[arg(short = 'g', long)]
    #[clap(help_heading = "Outputs")]
    graph_output: Option<PathBuf>,

    /// Render the final assembly graph as DOT to the given file
    #[arg(short = 'd', long)]
    #[clap(help_heading = "Outputs")]
    dot_output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Input assembly graph
    graph: PathBuf,

    /// Output filename. If not given, defaults to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// The assembly graph to analyze
    graph: PathBuf,

    /// Output filename. If not given, defaults to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap();

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_writer(stderr)
        .with_ansi(stderr().is_terminal());

    Registry::default()
        .with(stderr_log.with_filter(filter_layer))
        .init();
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if let Some(path) = path {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?
            }
        }

        Box::new(File::create(path)?)
    } else {
        Box::new(stdout())
    };

    Ok(writer)
}

fn read_graph(path: &PathBuf) -> Result<DebruijnGraph> {
    let file = File::open(path)
        .with_context(|| format!("Could not open graph file {:?}", path))?;

    Ok(load_graph(BufReader::new(file))?)
}

fn assemble_subcommand(args: &AssembleArgs) -> Result<()> {
    let reads = read_sequences(&args.reads)
        .with_context(|| format!("Could not read sequences from {:?}", args.reads))?;
    info!(reads = reads.len(), "read input sequences");

    let config = AssemblyConfig {
        k: args.kmer_size,
        tie_break_seed: args.tie_break_seed,
    };
    let assembly = assemble(&reads, &config)?;

    let mut writer = open_output(args.output.as_ref())?;
    write_contigs(&assembly.contigs, &mut writer)?;

    if let Some(path) = &args.graph_output {
        let file = File::create(path)?;
        save_graph(&assembly.graph, BufWriter::new(file))?;
    }

    if let Some(path) = &args.dot_output {
        let mut rendered = String::new();
        format_as_dot(&mut rendered, &assembly.graph)?;
        fs::write(path, rendered)?;
    }

    Ok(())
}

fn view_subcommand(args: &ViewArgs) -> Result<()> {
    let graph = read_graph(&args.graph)?;

    let mut rendered = String::new();
    format_as_dot(&mut rendered, &graph)?;

    let mut writer = open_output(args.output.as_ref())?;
    writer.write_all(rendered.as_bytes())?;

    Ok(())
}

fn stats_subcommand(args: &StatsArgs) -> Result<()> {
    let graph = read_graph(&args.graph)?;

    let writer = open_output(args.output.as_ref())?;
    write_stats(&graph, writer)?;

    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match &args.command {
        CliSubcommand::Assemble(v) => assemble_subcommand(v)?,
        CliSubcommand::View(v) => view_subcommand(v)?,
        CliSubcommand::Stats(v) => stats_subcommand(v)?,
    };

    Ok(())
}
