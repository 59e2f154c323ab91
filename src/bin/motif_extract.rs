//! motif-extract — pull the union of motif instances out of a graph.
//!
//! Writes the subgraph formed by every unique instance of the motif as GML,
//! and optionally a two-column `new,original` node-ID map back into the
//! input graph.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use motifclust::{Analyzer, gml};

#[derive(Parser)]
#[command(name = "motif-extract", version, about = "Extract the union of motif instances")]
struct Cli {
    /// Input graph (GML)
    graph: PathBuf,

    /// Output subgraph file (GML)
    output: PathBuf,

    /// Motif size in vertices (3 or 4)
    #[arg(long)]
    size: usize,

    /// Isomorphism-class index of the motif
    #[arg(long)]
    class: usize,

    /// Optional node-ID map file: one `new,original` pair per line
    #[arg(long)]
    map_out: Option<PathBuf>,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> motifclust::Result<()> {
    let source = std::fs::read_to_string(&cli.graph)?;
    let graph = gml::read(&source)?;

    let analyzer = Analyzer::vf2();
    let pattern = analyzer.pattern_from_isoclass(cli.size, cli.class, graph.is_directed())?;
    let extraction = analyzer.extract(&graph, &pattern);

    let mut out_file = File::create(&cli.output)?;
    gml::write(&extraction.graph, &mut out_file)?;

    if let Some(map_path) = &cli.map_out {
        let mut map_file = File::create(map_path)?;
        for (new_id, original) in extraction.node_map.iter().enumerate() {
            writeln!(map_file, "{new_id},{original}")?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
