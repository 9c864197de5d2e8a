//! WMC conversion tool.
//!
//! `parse` reads a WMC document and prints the MapStore map configuration;
//! `export` writes a map configuration back out as a WMC document.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wmc_cli::{export_command, parse_command, FileConfig, LogFormat, Newline, Overrides, ToolConfig};
use wmc_protocol::ContextMetadata;

#[derive(Parser, Debug)]
#[command(name = "wmc-cli")]
#[command(about = "Convert between WMC documents and MapStore map configurations")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, global = true, env = "WMC_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "WMC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, env = "WMC_LOG_FORMAT", value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a WMC document to map configuration JSON
    Parse {
        /// WMC document to read
        input: PathBuf,

        /// Put ungrouped layers into a group named after the context
        #[arg(long)]
        generate_layers_group: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert map configuration JSON to a WMC document
    Export {
        /// Map configuration JSON to read
        input: PathBuf,

        /// Context title
        #[arg(long)]
        title: String,

        /// Context abstract
        #[arg(long = "abstract")]
        abstract_text: Option<String>,

        /// Spaces per indentation level
        #[arg(long, env = "WMC_TAB_SIZE")]
        tab_size: Option<usize>,

        /// Line ending
        #[arg(long, env = "WMC_NEWLINE", value_enum)]
        newline: Option<Newline>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Args {
    fn overrides(&self) -> Overrides {
        let mut overrides = Overrides {
            log_level: self.log_level.clone(),
            log_format: self.log_format,
            ..Default::default()
        };
        match &self.command {
            Command::Parse {
                generate_layers_group,
                ..
            } => overrides.generate_layers_group = *generate_layers_group,
            Command::Export {
                tab_size, newline, ..
            } => {
                overrides.tab_size = *tab_size;
                overrides.newline = *newline;
            }
        }
        overrides
    }
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let file = args.config.as_ref().map(FileConfig::load).transpose()?;
    let config = ToolConfig::resolve(&args.overrides(), file.as_ref());

    init_tracing(&config)?;
    debug!(config = ?config, "Resolved configuration");

    match &args.command {
        Command::Parse { input, output, .. } => {
            info!(input = ?input, "Parsing WMC document");
            parse_command(input, output.as_deref(), &config.parse_options())
        }
        Command::Export {
            input,
            title,
            abstract_text,
            output,
            ..
        } => {
            info!(input = ?input, "Exporting map configuration");
            let context = ContextMetadata {
                title: title.clone(),
                abstract_text: abstract_text.clone(),
            };
            export_command(input, output.as_deref(), &context, &config.write_options())
        }
    }
}

/// Logs go to stderr so stdout only carries the converted document.
fn init_tracing(config: &ToolConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
    }
    Ok(())
}
