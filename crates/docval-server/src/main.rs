//! docval validation server
//!
//! # Usage
//!
//! ```bash
//! docval-server [--config <path>] [--listen <addr>] [--execution sequential|concurrent]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `docval=info,tower_http=info`)

use std::path::PathBuf;

use clap::Parser;
use docval_server::{ConfigLayer, ServerConfig, logging};

/// Validate CSAF documents over HTTP
#[derive(Parser)]
#[command(name = "docval-server")]
#[command(about = "Validate CSAF documents against selectable checks and presets")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    flags: ConfigLayer,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = ServerConfig::resolve(args.config.as_deref(), &args.flags)?;
    logging::init(&config.log_filter)?;

    let catalog = docval_rules::builtin_catalog()?;
    tracing::info!(
        checks = catalog.len(),
        presets = ?catalog.preset_names(),
        "Loaded check catalog"
    );

    docval_server::run(config, catalog).await?;
    Ok(())
}
