//! wncanon CLI
//!
//! Converts the editable YAML source of the English WordNet into the WN-LMF
//! release files, keeping sense ids and element order stable against the
//! previously published XML.
//!
//! ```text
//! wncanon from-yaml   # write src/xml/wn-<lex name>.xml + wn-from-yaml.xml
//! wncanon check       # run everything, write nothing
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::Level;

mod config;
mod run;

use config::CanonConfig;

#[derive(Parser)]
#[command(name = "wncanon")]
#[command(author, version, about = "Canonical WN-LMF generation for the English WordNet")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Directory of YAML source files
    #[arg(long)]
    source: Option<PathBuf>,

    /// Directory of published `wn-<lex name>.xml` files
    #[arg(long)]
    xml_dir: Option<PathBuf>,

    /// Write the run report as JSON
    #[arg(long)]
    report_json: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the YAML source to WN-LMF, one file per lex name plus a unified file.
    FromYaml {
        #[command(flatten)]
        args: SourceArgs,

        /// Unified output file
        #[arg(long)]
        unified: Option<PathBuf>,
    },

    /// Run the conversion without writing any XML and report what would change.
    Check {
        #[command(flatten)]
        args: SourceArgs,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli_config: Option<&PathBuf>, args: &SourceArgs) -> Result<CanonConfig> {
    let mut config = match cli_config {
        Some(path) => CanonConfig::load(path)?,
        None => CanonConfig::default(),
    };
    if let Some(source) = &args.source {
        config.source_dir = source.clone();
    }
    if let Some(xml_dir) = &args.xml_dir {
        config.xml_dir = xml_dir.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::FromYaml { args, unified } => {
            let mut config = resolve_config(cli.config.as_ref(), args)?;
            if let Some(unified) = unified {
                config.unified_file = unified.clone();
            }
            let output = run::run_batch(&config)?;
            let written = run::write_outputs(&output, &config.xml_dir, &config.unified_file)?;
            run::print_summary(&output);
            for path in &written {
                eprintln!("{} {}", "wrote".green().bold(), path.display().to_string().bold());
            }
            if let Some(path) = &args.report_json {
                run::write_report_json(&output, path)?;
            }
        }
        Commands::Check { args } => {
            let config = resolve_config(cli.config.as_ref(), args)?;
            let output = run::run_batch(&config)?;
            run::print_summary(&output);
            if let Some(path) = &args.report_json {
                run::write_report_json(&output, path)?;
            }
        }
    }
    Ok(())
}
