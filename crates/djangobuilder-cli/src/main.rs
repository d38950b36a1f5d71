//! Django Builder command-line inspector
//!
//! Rebuilds projects from a JSON record store and reports on them.

mod commands;
mod formatter;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use formatter::OutputFormat;

/// Django Builder command-line inspector
#[derive(Parser, Debug)]
#[command(name = "djangobuilder")]
#[command(version, about = "Inspect Django Builder record stores")]
pub struct Args {
    /// Output format
    #[arg(long, default_value = "table", value_enum, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rebuild every project in a record store and print its schema
    Inspect {
        /// Record store JSON file
        path: PathBuf,

        /// Skip dangling records and fall back to auth.User for unknown targets
        #[arg(long)]
        lenient: bool,
    },
    /// Rebuild a record store and report schema problems
    Check {
        /// Record store JSON file
        path: PathBuf,

        /// Skip dangling records and fall back to auth.User for unknown targets
        #[arg(long)]
        lenient: bool,
    },
    /// List registered field types
    Types {
        /// Only types that need the PostgreSQL backend
        #[arg(long)]
        postgres: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("djangobuilder=info,djangobuilder_records=info")
            }),
        )
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(clean) => {
            if !clean {
                std::process::exit(2);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Run a command. Returns `false` when `check` found problems.
fn run(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    match args.command {
        Command::Inspect { path, lenient } => {
            let store = commands::load(&path)?;
            println!("{}", commands::inspect(&store, commands::config(lenient), args.format)?);
            Ok(true)
        }
        Command::Check { path, lenient } => {
            let store = commands::load(&path)?;
            let problems = commands::check(&store, commands::config(lenient))?;
            println!("{}", formatter::format_problems(&problems, args.format));
            Ok(problems.is_empty())
        }
        Command::Types { postgres } => {
            println!("{}", formatter::format_types(&commands::types(postgres), args.format));
            Ok(true)
        }
    }
}
