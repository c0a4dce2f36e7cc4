//! CLI for the skuimg SKU image resolver.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use skuimg_core::config::{self, SkuImgConfig, StrategyKind};
use std::path::PathBuf;

use commands::{run_candidates, run_probe, run_sync};

/// Top-level CLI for skuimg.
#[derive(Debug, Parser)]
#[command(name = "skuimg")]
#[command(about = "skuimg: resolve product SKUs to CDN image URLs", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/skuimg/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve every SKU row in the sheet and write URL and status columns back.
    Run {
        /// JSON sheet store (overrides sheet.path from config).
        #[arg(long, value_name = "PATH")]
        sheet: Option<PathBuf>,
        /// Filename strategy: fixed_list, single_guess, handle or listing.
        #[arg(long)]
        strategy: Option<StrategyKind>,
        /// Maximum outstanding HEAD probes.
        #[arg(long, value_name = "N")]
        max_concurrent: Option<usize>,
        /// Resolve and print results without writing to the sheet.
        #[arg(long)]
        dry_run: bool,
    },

    /// Check whether a single URL is reachable.
    Probe {
        /// Direct HTTP/HTTPS URL to check.
        url: String,
    },

    /// Print the candidate URLs the configured strategy would probe for a SKU.
    Candidates {
        /// Product SKU (at least 5 characters).
        sku: String,
        /// Product title/handle, for the handle strategy.
        #[arg(long)]
        handle: Option<String>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                sheet,
                strategy,
                max_concurrent,
                dry_run,
            } => {
                let cfg = with_overrides(cfg, strategy, max_concurrent);
                run_sync(&cfg, sheet.as_deref(), dry_run).await?;
            }
            CliCommand::Probe { url } => run_probe(&cfg, &url).await?,
            CliCommand::Candidates { sku, handle } => {
                run_candidates(&cfg, &sku, handle.as_deref())?
            }
        }

        Ok(())
    }
}

/// Apply per-invocation flag overrides on top of the loaded config.
fn with_overrides(
    mut cfg: SkuImgConfig,
    strategy: Option<StrategyKind>,
    max_concurrent: Option<usize>,
) -> SkuImgConfig {
    if let Some(strategy) = strategy {
        cfg.strategy = strategy;
    }
    if let Some(n) = max_concurrent {
        cfg.max_concurrent_probes = n;
    }
    cfg
}

#[cfg(test)]
mod tests;
