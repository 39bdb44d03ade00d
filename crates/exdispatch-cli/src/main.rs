use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use exdispatch_core::app::{Prepared, Scenario};
use exdispatch_core::domain::{DispatchResult, Propagation, catalog};
use exdispatch_core::observability;

const EXIT_HANDLED: u8 = 0;
/// Unreadable or invalid scenario.
const EXIT_ERROR: u8 = 1;
/// Exit status when the condition escapes the outermost block.
const EXIT_UNHANDLED: u8 = 3;

#[derive(Debug, Parser)]
#[command(name = "exdispatch", about = "Exception handler dispatch for nested SQL blocks")]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Raise the scenario's condition and print where it ends up.
    Run {
        file: PathBuf,

        /// Print the propagation as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Validate a scenario without raising anything.
    Check { file: PathBuf },
    /// List the predefined exceptions.
    Catalog,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    observability::init(cli.log_json);

    ExitCode::from(exit_status(run(cli.command).await))
}

fn exit_status(result: anyhow::Result<u8>) -> u8 {
    match result {
        Ok(status) => status,
        Err(err) => {
            eprintln!("error: {err:#}");
            EXIT_ERROR
        }
    }
}

async fn run(command: Command) -> anyhow::Result<u8> {
    match command {
        Command::Run { file, json } => {
            let prepared = prepare(&file).await?;
            let propagation = prepared.run().context("raising condition")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&propagation)?);
            } else {
                print_trace(&prepared, &propagation);
            }
            Ok(if propagation.is_handled() {
                EXIT_HANDLED
            } else {
                EXIT_UNHANDLED
            })
        }
        Command::Check { file } => {
            let prepared = prepare(&file).await?;
            info!(
                blocks = prepared.program.blocks().len(),
                packages = prepared.program.packages().len(),
                "scenario ok"
            );
            println!("ok: {}", file.display());
            Ok(EXIT_HANDLED)
        }
        Command::Catalog => {
            for p in catalog::PREDEFINED {
                println!("{:<24} {:>7}  {}", p.name, p.code, p.message);
            }
            Ok(EXIT_HANDLED)
        }
    }
}

async fn prepare(file: &Path) -> anyhow::Result<Prepared> {
    let json = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    let scenario = Scenario::from_json(&json).with_context(|| format!("parsing {}", file.display()))?;
    scenario
        .build()
        .with_context(|| format!("invalid scenario {}", file.display()))
}

fn print_trace(prepared: &Prepared, propagation: &Propagation) {
    println!("raised: {} ({})", prepared.condition, prepared.condition.sqlerrm());
    for step in propagation.steps() {
        let label = step.label.as_deref().unwrap_or("-");
        let verdict = match step.result {
            DispatchResult::Matched { position, catch_all: true } => {
                format!("WHEN OTHERS at {position}")
            }
            DispatchResult::Matched { position, .. } => format!("matched {position}"),
            DispatchResult::Unhandled => "no handler".to_string(),
        };
        let reraised = if step.reraised { ", re-raised" } else { "" };
        println!("  {} [{label}] sees {}: {verdict}{reraised}", step.depth, step.seen_as);
    }
    match propagation {
        Propagation::Handled { depth, position, condition, .. } => {
            println!("handled at {depth} by {position}: SQLCODE={}", condition.sqlcode());
        }
        Propagation::Unhandled { condition, .. } => {
            println!("unhandled: {}", condition.sqlerrm());
        }
    }
}
