//! motif-types — per-clustering-type census of motif instance pairs.
//!
//! Prints one comma-separated line: a pair count per clustering type, the
//! unclustered (disjoint) bucket last. With `--out-prefix` it also writes
//! each type's canonical graph as `PREFIXType<k>.gml` and the involved host
//! node IDs as `PREFIXNodeMaps.txt` (one line per type).

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use motifclust::{Analyzer, gml};

#[derive(Parser)]
#[command(name = "motif-types", version, about = "Census of motif clustering types")]
struct Cli {
    /// Input graph (GML)
    graph: PathBuf,

    /// Motif size in vertices (3 or 4)
    #[arg(long)]
    size: usize,

    /// Isomorphism-class index of the motif
    #[arg(long)]
    class: usize,

    /// Prefix for per-type GML files and the node-map file
    #[arg(long)]
    out_prefix: Option<String>,

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
    let (catalogue, census) = analyzer.census(&graph, &pattern, cli.out_prefix.is_some())?;

    let line: Vec<String> = census.counts().iter().map(|c| c.to_string()).collect();
    println!("{}", line.join(","));

    if let Some(prefix) = &cli.out_prefix {
        for (k, entry) in catalogue.entries().iter().enumerate() {
            let mut type_file = File::create(format!("{prefix}Type{}.gml", k + 1))?;
            gml::write(entry, &mut type_file)?;
        }

        let mut map_file = File::create(format!("{prefix}NodeMaps.txt"))?;
        if let Some(sets) = census.node_sets() {
            for set in sets {
                let ids: Vec<String> = set.iter().map(|v| v.to_string()).collect();
                writeln!(map_file, "{}", ids.join(","))?;
            }
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
