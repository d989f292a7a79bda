mod batch;
mod numbers;
mod reports;
mod seeds;
mod stats;
mod util;

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use landlord_game::MatchConfig;
use std::fs::{self, File};
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use batch::{BatchPlan, run_batch};
use reports::{BatchReport, LabelStyle};
use seeds::resolve_seed_inputs;
use stats::BatchStats;
use util::split_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    Console,
    /// Machine-readable statistics
    Json,
    /// Markdown tables
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "landlord-sim", version)]
#[command(about = "Run batches of Landlord matches and report how each purchase strategy fares")]
struct Args {
    /// Matches to run per seed
    #[arg(long, default_value_t = 300)]
    matches: usize,

    /// Batch seeds (comma-separated integers)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Optional JSON file overriding match settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Strategy names used in reports
    #[arg(long, value_enum, default_value_t = LabelStyle::English)]
    labels: LabelStyle,

    /// Run the matches of each batch on all cores
    #[arg(long)]
    parallel: bool,

    /// Include every match in the report
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.output.is_some() {
        colored::control::set_override(false);
    }

    let start_time = Instant::now();
    let config = load_config(args.config.as_deref())?;
    let reports = run_batches(&args, &config)?;
    write_reports(&args, &reports, start_time.elapsed())?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<MatchConfig> {
    let config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            MatchConfig::from_json(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => MatchConfig::default(),
    };
    config.validate().context("invalid match configuration")?;
    Ok(config)
}

fn run_batches(args: &Args, config: &MatchConfig) -> Result<Vec<BatchReport>> {
    ensure!(args.matches > 0, "--matches must be at least 1");
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let plan = BatchPlan {
        matches: args.matches,
        parallel: args.parallel,
    };

    let mut reports = Vec::with_capacity(seeds.len());
    for seed in seeds {
        log::info!(
            "running {} matches from seed {seed}{}",
            plan.matches,
            if plan.parallel { " in parallel" } else { "" }
        );
        let run = run_batch(config, seed, plan)?;
        let stats = BatchStats::from_run(&run);
        let records = if args.verbose { run.records } else { Vec::new() };
        reports.push(BatchReport { stats, records });
    }
    Ok(reports)
}

fn write_reports(args: &Args, reports: &[BatchReport], duration: Duration) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => reports::generate_json_report(output_target.writer(), reports)?,
        ReportFormat::Markdown => {
            reports::generate_markdown_report(output_target.writer(), reports, args.labels)?;
        }
        ReportFormat::Console => reports::generate_console_report(
            output_target.writer(),
            reports,
            args.labels,
            duration,
        )?,
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}
