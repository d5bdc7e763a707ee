//! Command-line interface for bundling and splitting specification documents.
//!
//! `bundle` resolves a multi-file tree into one JSON document; `split`
//! decomposes a composed JSON document into a linked file tree. Exit code is
//! 0 on success and 1 on any error, with the full diagnostic on stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use openapi_bundle::{split_file, write_bundle_with_options, BundleOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "openapi-bundle")]
#[command(about = "Bundle or split a multi-file OpenAPI specification", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve every file reference and write a single bundled JSON document
    Bundle {
        /// Path to the root index document
        source: PathBuf,
        /// Where to write the bundled JSON output
        destination: PathBuf,
        /// Skip the schema-component validation pre-pass
        #[arg(long)]
        skip_validation: bool,
    },
    /// Decompose a composed JSON document into a tree of linked files
    Split {
        /// Path to the composed JSON document
        #[arg(long, default_value = "docs/openapi.json")]
        source: PathBuf,
        /// Output directory for the split tree
        #[arg(long, default_value = "docs/openapi")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match args.command {
        Command::Bundle {
            source,
            destination,
            skip_validation,
        } => {
            let options = BundleOptions::new().skip_validation(skip_validation);
            write_bundle_with_options(&source, &destination, &options)?;
        }
        Command::Split { source, out } => {
            split_file(&source, &out)?;
        }
    }

    Ok(())
}
