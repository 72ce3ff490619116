//! riskgraph CLI
//!
//! Loads relationship tables, runs the risk pipeline, and writes the JSON
//! documents for the front end.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use riskgraph_analysis::export::{export_collection, export_control, export_guarantee};
use riskgraph_analysis::ingest::{
    CollectionReader, ControlReader, GuaranteeReader, IngestReport, Ingested,
};
use riskgraph_analysis::RiskPipeline;
use riskgraph_core::config::{CliOverrides, RiskGraphConfig};
use riskgraph_core::errors::{PipelineError, RiskErrorCode};
use riskgraph_core::events::types::{SubgraphRejectedEvent, TriadConfirmedEvent};
use riskgraph_core::events::{EventDispatcher, RiskEventHandler};
use riskgraph_core::tracing::init_tracing;

#[derive(Parser)]
#[command(name = "riskgraph")]
#[command(version, about = "Risk typing for guarantee, fund-collection and control networks", long_about = None)]
struct Cli {
    /// Explicit config file (skips the project and user lookup)
    #[arg(short, long, global = true, env = "RISKGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Worker threads (0 = one per core)
    #[arg(short, long, global = true)]
    threads: Option<usize>,

    /// Output directory for JSON documents
    #[arg(short, long, global = true)]
    out: Option<String>,

    /// Pretty-print JSON documents
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Type guarantee risk and score exposure
    Guarantee {
        /// Guarantee table (src, destn, time, guarType, amount)
        input: PathBuf,
    },

    /// Find shell-enterprise triads and score net inflow
    Collection {
        /// Fund-collection transaction export
        input: PathBuf,

        /// Days a transfer may trail its loan
        #[arg(long)]
        max_day_gap: Option<u32>,
    },

    /// Resolve ultimate controllers and cross-holdings
    Control {
        /// Control table (relTag, src, destn, relType, rate)
        input: PathBuf,
    },

    /// Run all three datasets
    All {
        guarantee: PathBuf,
        collection: PathBuf,
        control: PathBuf,
    },
}

/// Logs per-item events the pipeline summary does not cover.
struct EventLog;

impl RiskEventHandler for EventLog {
    fn on_subgraph_rejected(&self, event: &SubgraphRejectedEvent) {
        tracing::debug!(dataset = %event.dataset, subgraph = event.subgraph_id, "rejected: {}", event.message);
    }

    fn on_triad_confirmed(&self, event: &TriadConfirmedEvent) {
        tracing::debug!(
            origin = %event.origin,
            pass_through = %event.pass_through,
            recipient = %event.recipient,
            ratio = event.ratio,
            "triad confirmed"
        );
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "riskgraph failed");
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    let max_day_gap = match &cli.command {
        Commands::Collection { max_day_gap, .. } => *max_day_gap,
        _ => None,
    };
    let overrides = CliOverrides {
        threads: cli.threads,
        output_dir: cli.out.clone(),
        max_day_gap,
        pretty: cli.pretty.then_some(true),
    };
    let config = match &cli.config {
        Some(path) => RiskGraphConfig::load_file(path, Some(&overrides)),
        None => {
            let root = std::env::current_dir().context("cannot resolve working directory")?;
            RiskGraphConfig::load(&root, Some(&overrides))
        }
    }
    .map_err(|e| anyhow::anyhow!(e.tagged_string()))?;

    let out = PathBuf::from(config.export.effective_output_dir());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(EventLog));
    let pipeline = RiskPipeline::new(config, dispatcher)?;

    match cli.command {
        Commands::Guarantee { input } => cmd_guarantee(&pipeline, &input, &out),
        Commands::Collection { input, .. } => cmd_collection(&pipeline, &input, &out),
        Commands::Control { input } => cmd_control(&pipeline, &input, &out),
        Commands::All {
            guarantee,
            collection,
            control,
        } => {
            cmd_guarantee(&pipeline, &guarantee, &out)?;
            cmd_collection(&pipeline, &collection, &out)?;
            cmd_control(&pipeline, &control, &out)
        }
    }
}

fn cmd_guarantee(pipeline: &RiskPipeline, input: &Path, out: &Path) -> Result<()> {
    let Ingested { graph, report } = GuaranteeReader::new()
        .read_path(input)
        .with_context(|| format!("loading guarantee table {}", input.display()))?;
    print_ingest("guarantee", input, &report);

    let result = pipeline.run_guarantee(graph);
    print_rejections(&result.errors);
    let summary = export_guarantee(&result.data, &pipeline.config().export, out)?;

    let data = &result.data;
    println!(
        "guarantee: {} subgraphs ({} rejected), {} mutual pairs, {} circles, {} files",
        data.subgraphs.len() + data.rejected,
        data.rejected,
        data.mutual_pairs,
        data.circles,
        summary.file_count()
    );
    Ok(())
}

fn cmd_collection(pipeline: &RiskPipeline, input: &Path, out: &Path) -> Result<()> {
    let reader = CollectionReader::new(&pipeline.config().ingest)?;
    let Ingested { graph, report } = reader
        .read_path(input)
        .with_context(|| format!("loading fund-collection table {}", input.display()))?;
    print_ingest("collection", input, &report);

    let result = pipeline.run_collection(graph);
    print_rejections(&result.errors);
    let summary = export_collection(&result.data, &pipeline.config().export, out)?;

    let data = &result.data;
    println!(
        "collection: {} subgraphs ({} rejected), {} triads over {} accounts, {} files",
        data.subgraphs.len() + data.rejected,
        data.rejected,
        data.triads.len(),
        data.pattern.entity_count(),
        summary.file_count()
    );
    Ok(())
}

fn cmd_control(pipeline: &RiskPipeline, input: &Path, out: &Path) -> Result<()> {
    let Ingested { graph, report } = ControlReader::new()
        .read_path(input)
        .with_context(|| format!("loading control table {}", input.display()))?;
    print_ingest("control", input, &report);

    let result = pipeline.run_control(graph);
    print_rejections(&result.errors);
    let summary = export_control(&result.data, &pipeline.config().export, out)?;

    let data = &result.data;
    println!(
        "control: {} subgraphs ({} rejected), {} rooted, {} cross-held entities, {} files",
        data.subgraphs.len() + data.rejected,
        data.rejected,
        data.rooted,
        data.cross_held,
        summary.file_count()
    );
    Ok(())
}

fn print_ingest(dataset: &str, input: &Path, report: &IngestReport) {
    println!(
        "{dataset}: read {} rows from {}, {} accepted, {} skipped",
        report.rows_read,
        input.display(),
        report.rows_accepted,
        report.rows_skipped()
    );
    for error in &report.errors {
        tracing::warn!(%dataset, "{}", error.tagged_string());
    }
}

fn print_rejections(errors: &[PipelineError]) {
    for error in errors {
        eprintln!("  {}", error.tagged_string());
    }
}
