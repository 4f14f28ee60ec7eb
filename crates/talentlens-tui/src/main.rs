//! TalentLens TUI - find assessments for a role description.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use talentlens_core::{paths, Config};

#[derive(Parser)]
#[command(name = "talentlens")]
#[command(about = "Terminal client for the TalentLens assessment recommender", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Recommendation endpoint URL (overrides config and TALENTLENS_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Start with AI insights turned off
    #[arg(long)]
    no_ai: bool,

    /// Config file (default: ~/.talentlens/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print build information and exit
    #[arg(short = 'V', long)]
    version: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!(
            "{}",
            talentlens_core::build_info::BUILD_INFO.version_line("talentlens")
        );
        return Ok(());
    }

    let config_path = cli.config.unwrap_or_else(paths::config_path);
    let mut config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if cli.no_ai {
        config.use_ai = false;
    }

    // The alternate screen owns the terminal, so logs go to a file.
    talentlens_core::logging::init_to_file(&paths::log_path(), Some(&config.log_level))
        .context("Failed to initialize logging")?;

    talentlens_tui::run(config)
}
