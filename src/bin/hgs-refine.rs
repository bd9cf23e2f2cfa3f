//! Command-line front-end: refine a JSON batch of tours.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use hgs_refine::{refine_batch, Config, HgsSolver, TourBatch};

#[derive(Parser, Debug)]
#[command(about = "Improve a batch of CVRP tours with the HGS-CVRP local search")]
struct Args {
    /// JSON file holding the tour batch
    batch: PathBuf,
    /// Path to the compiled libhgscvrp shared library
    #[arg(long)]
    library: PathBuf,
    /// Local search iteration count per tour
    #[arg(long, default_value_t = 1)]
    iterations: u32,
    /// Random seed forwarded to the solver
    #[arg(long, default_value_t = 0)]
    seed: i32,
    /// Time limit per call in seconds, 0 to disable
    #[arg(long, default_value_t = 0.0)]
    time_limit: f64,
    /// Forward solver progress output
    #[arg(long)]
    verbose: bool,
    /// Where to write the improved batch; stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let raw = fs::read_to_string(&args.batch)
        .with_context(|| format!("could not read {}", args.batch.display()))?;
    let batch: TourBatch = serde_json::from_str(&raw)
        .with_context(|| format!("could not parse {}", args.batch.display()))?;
    info!("loaded batch of {} tours", batch.len());

    let config = Config::new()
        .with_seed(args.seed)
        .with_time_limit(args.time_limit);
    let solver = HgsSolver::load(&args.library, config)?.with_verbose(args.verbose);

    let improved = refine_batch(&batch, &solver, args.iterations)?;

    let rendered = serde_json::to_string(&improved)?;
    match args.output {
        Some(path) => fs::write(&path, rendered)
            .with_context(|| format!("could not write {}", path.display()))?,
        None => println!("{}", rendered),
    }

    Ok(())
}
