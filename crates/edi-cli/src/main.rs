//! # edi-cli
//!
//! Command-line reporting for EDI message error contexts.
//!
//! Reads the violations found by one or more validation passes over a
//! message, reduces them into a single error context, and prints the result.

mod findings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use edi_error_context::{ErrorContext, ErrorReporter, ReportConfig, ReportFormat};
use tracing_subscriber::EnvFilter;

use crate::findings::Findings;

#[derive(Parser)]
#[command(name = "edi")]
#[command(about = "EDI error context reporting")]
#[command(version)]
struct Cli {
    /// Path to report configuration file (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce validation passes into one error report
    Report {
        /// Findings file path (YAML or JSON)
        input: PathBuf,

        /// Output format, overrides the configuration file
        #[arg(short, long)]
        format: Option<ReportFormat>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    match cli.command {
        Commands::Report { input, format } => {
            tracing::info!("Reporting findings from {}", input.display());
            let config = match format {
                Some(format) => config.format(format),
                None => config,
            };

            let findings = Findings::load(&input)?;
            let ack_requested = findings.ack_requested;
            let report = findings.reduce();

            let rendered = ErrorReporter::from_config(&config).render(&report)?;
            print!("{rendered}");
            if config.format == ReportFormat::Text {
                let generate = config.technical_acknowledgment.resolve(ack_requested);
                println!(
                    "Technical acknowledgment: {} (policy {})",
                    if generate { "generated" } else { "not generated" },
                    config.technical_acknowledgment
                );
            }

            Ok(if report.has_errors() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}
