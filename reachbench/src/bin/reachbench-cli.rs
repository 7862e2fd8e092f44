use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use reachbench::logging::{self, LoggingError};
use reachbench::*;
use tracing::{error, info};

/// Times all-vertices reachability (BFS/DFS over matrix/list) on random
/// graphs across a grid of sizes and densities.
#[derive(Debug, Parser)]
#[command(name = "reachbench-cli", version)]
struct Cli {
    /// Vertex counts to sweep.
    #[arg(long, value_delimiter = ',', default_values_t = experiment::DEFAULT_VERTEX_COUNTS)]
    nodes: Vec<usize>,
    /// Edge densities in percent (0-100).
    #[arg(long, value_delimiter = ',', default_values_t = experiment::DEFAULT_DENSITIES)]
    densities: Vec<u32>,
    /// Traversal methods: bfs, dfs.
    #[arg(long, value_delimiter = ',', default_values_t = Method::ALL)]
    methods: Vec<Method>,
    /// Graph representations: matrix, list.
    #[arg(long, value_delimiter = ',', default_values_t = Representation::ALL)]
    representations: Vec<Representation>,
    /// Repetitions per configuration.
    #[arg(long, default_value_t = experiment::DEFAULT_ITERATIONS)]
    iterations: usize,
    /// Seed for reproducible graphs.
    #[arg(long)]
    seed: Option<u64>,
    /// Worker threads per reachability batch (default: available parallelism).
    #[arg(long)]
    threads: Option<NonZeroUsize>,
    /// Output file, or `-` for stdout.
    #[arg(long, default_value = "results.tsv")]
    output: PathBuf,
    /// Output format: tsv or jsonl.
    #[arg(long, default_value_t = OutputFormat::Tsv)]
    format: OutputFormat,
}

impl Cli {
    fn config(&self) -> ExperimentConfig {
        ExperimentConfig {
            vertex_counts: self.nodes.clone(),
            densities: self.densities.clone(),
            methods: self.methods.clone(),
            representations: self.representations.clone(),
            iterations: self.iterations,
            seed: self.seed,
            threads: self.threads,
        }
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let runner = ExperimentRunner::new(cli.config()).context("invalid experiment configuration")?;
    info!(total = runner.config().total_runs(), "starting experiments");

    let step = (runner.config().total_runs() / 20).max(1);
    let records = runner
        .run_grid(|p| {
            if p.completed % step == 0 || p.completed == p.total {
                info!(completed = p.completed, total = p.total, "progress");
            }
        })
        .context("experiment run failed")?;

    if cli.output.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        write_records(&records, cli.format, &mut out).context("failed to write results")?;
        out.flush().context("failed to flush output")?;
    } else {
        let file = File::create(&cli.output)
            .with_context(|| format!("failed to create {}", cli.output.display()))?;
        let mut out = BufWriter::new(file);
        write_records(&records, cli.format, &mut out).context("failed to write results")?;
        out.flush().context("failed to flush output")?;
        info!(path = %cli.output.display(), records = records.len(), "results saved");
    }
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }
    if let Err(err) = try_main() {
        let code = err.downcast_ref::<ReachError>().map(|e| e.code().as_str());
        let message = format!("{err:#}");
        error!(error = %message, code, "reachbench failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
