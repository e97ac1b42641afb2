//! Circmat Command-Line Interface
//!
//! The main entry point for the Circmat CLI tool. Matrix documents are read
//! from JSON, YAML or plain token text, chosen by file extension.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{check, compact, gates, insert, show, version};

/// Circmat - inspect and restructure quantum circuit matrices
#[derive(Parser)]
#[command(name = "circmat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a matrix as a cell grid
    Show {
        /// Input file (JSON, YAML or text)
        #[arg(short, long)]
        input: String,
    },

    /// Validate gate structure and report matrix statistics
    Check {
        /// Input file (JSON, YAML or text)
        #[arg(short, long)]
        input: String,
    },

    /// Remove unused lines and idle columns
    Compact {
        /// Input file (JSON, YAML or text)
        #[arg(short, long)]
        input: String,

        /// Output file (format from extension, text to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Only remove columns, keep every line
        #[arg(long)]
        keep_rows: bool,
    },

    /// Insert idle columns before a position
    InsertColumns {
        /// Input file (JSON, YAML or text)
        #[arg(short, long)]
        input: String,

        /// Output file (format from extension, text to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Column index before which columns are inserted
        #[arg(short, long)]
        before: usize,

        /// Number of columns to insert
        #[arg(short, long, default_value = "1")]
        count: usize,
    },

    /// List the CNOT instances with their controls and targets
    Gates {
        /// Input file (JSON, YAML or text)
        #[arg(short, long)]
        input: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Show { input } => show::execute(&input),

        Commands::Check { input } => check::execute(&input),

        Commands::Compact {
            input,
            output,
            keep_rows,
        } => compact::execute(&input, output.as_deref(), keep_rows),

        Commands::InsertColumns {
            input,
            output,
            before,
            count,
        } => insert::execute(&input, output.as_deref(), before, count),

        Commands::Gates { input, format } => gates::execute(&input, &format),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
