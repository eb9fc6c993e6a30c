//! orderdoc CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod input;

#[derive(Parser)]
#[command(name = "orderdoc")]
#[command(version)]
#[command(about = "Merge catalog specifications and render order documents", long_about = None)]
struct Cli {
    /// Document settings file (YAML or JSON)
    #[arg(long, global = true, env = "ORDERDOC_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the merged specification set of one catalog option
    Merge {
        /// Catalog file with options, optionSpecs and optionTypes
        #[arg(short, long)]
        catalog: PathBuf,

        /// Option id
        option: String,

        /// Write output to FILE instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute per-group totals for an order
    Totals {
        /// Catalog file with options, optionSpecs and optionTypes
        #[arg(short, long)]
        catalog: PathBuf,

        /// Order file with meta and items
        input: PathBuf,

        /// Write output to FILE instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render an order to printable HTML
    Render {
        /// Catalog file with options, optionSpecs and optionTypes
        #[arg(short, long)]
        catalog: PathBuf,

        /// Order file with meta and items
        input: PathBuf,

        /// Write output to FILE instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on malformed templates and unresolved placeholders
        #[arg(long)]
        strict: bool,
    },

    /// Export an order as rows of cells
    Export {
        /// Catalog file with options, optionSpecs and optionTypes
        #[arg(short, long)]
        catalog: PathBuf,

        /// Order file with meta and items
        input: PathBuf,

        /// Output format
        #[arg(short = 't', long, value_enum, default_value_t = commands::export::ExportFormat::Csv)]
        to: commands::export::ExportFormat,

        /// Write output to FILE instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("ORDERDOC_LOG")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| "orderdoc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = config::load_settings(cli.settings.as_deref())?;

    match cli.command {
        Commands::Merge {
            catalog,
            option,
            output,
        } => commands::merge::execute(commands::merge::MergeArgs {
            catalog,
            option,
            output,
        }),
        Commands::Totals {
            catalog,
            input,
            output,
        } => commands::totals::execute(commands::totals::TotalsArgs {
            catalog,
            input,
            output,
        }),
        Commands::Render {
            catalog,
            input,
            output,
            strict,
        } => commands::render::execute(
            commands::render::RenderArgs {
                catalog,
                input,
                output,
                strict,
            },
            settings,
        ),
        Commands::Export {
            catalog,
            input,
            to,
            output,
        } => commands::export::execute(
            commands::export::ExportArgs {
                catalog,
                input,
                format: to,
                output,
            },
            settings,
        ),
    }
}
