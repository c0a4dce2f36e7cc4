use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::engine::EngineOptions;
use crate::record::StatusMarker;
use crate::sheet::SheetLayout;
use crate::strategy::{CdnListing, FilenameStrategy, PREFIX_PLACEHOLDER};

/// CDN directory the product images live under.
pub const DEFAULT_CDN_BASE_URL: &str = "https://cdn.shopify.com/s/files/1/0474/3446/5442/files/";

/// Filename strategy selector: "fixed_list" (default), "single_guess", "handle" or "listing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    FixedList,
    SingleGuess,
    Handle,
    Listing,
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fixed_list" => Ok(StrategyKind::FixedList),
            "single_guess" => Ok(StrategyKind::SingleGuess),
            "handle" => Ok(StrategyKind::Handle),
            "listing" => Ok(StrategyKind::Listing),
            other => Err(format!(
                "unknown strategy {other:?} (expected fixed_list, single_guess, handle or listing)"
            )),
        }
    }
}

/// Glyphs written to the status column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMarkers {
    pub found: String,
    pub not_found: String,
}

impl Default for StatusMarkers {
    fn default() -> Self {
        Self {
            found: "✅".to_string(),
            not_found: "❌".to_string(),
        }
    }
}

impl StatusMarkers {
    pub fn render(&self, status: StatusMarker) -> &str {
        match status {
            StatusMarker::Found => &self.found,
            StatusMarker::NotFound => &self.not_found,
        }
    }
}

/// Global configuration loaded from `~/.config/skuimg/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkuImgConfig {
    /// CDN directory candidate filenames are joined onto.
    pub cdn_base_url: String,
    /// Maximum outstanding HEAD probes across the whole batch.
    pub max_concurrent_probes: usize,
    /// Per-probe deadline in seconds; expiry counts as not found.
    pub probe_timeout_secs: u64,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub strategy: StrategyKind,
    /// Fixed-list patterns with a `{prefix}` placeholder; built-in list if missing.
    #[serde(default)]
    pub patterns: Option<Vec<String>>,
    /// CDN listing (one filename per line) for the listing strategy.
    #[serde(default)]
    pub listing_path: Option<PathBuf>,
    #[serde(default)]
    pub sheet: SheetLayout,
    #[serde(default)]
    pub markers: StatusMarkers,
}

impl Default for SkuImgConfig {
    fn default() -> Self {
        Self {
            cdn_base_url: DEFAULT_CDN_BASE_URL.to_string(),
            max_concurrent_probes: 16,
            probe_timeout_secs: 5,
            connect_timeout_secs: 5,
            strategy: StrategyKind::default(),
            patterns: None,
            listing_path: None,
            sheet: SheetLayout::default(),
            markers: StatusMarkers::default(),
        }
    }
}

impl SkuImgConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs.max(1))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            max_concurrent_probes: self.max_concurrent_probes.max(1),
            probe_timeout: self.probe_timeout(),
        }
    }

    /// Build the configured filename strategy. Reads the listing file for the listing strategy.
    pub fn build_strategy(&self) -> Result<FilenameStrategy> {
        match self.strategy {
            StrategyKind::FixedList => match &self.patterns {
                Some(patterns) if !patterns.is_empty() => {
                    for p in patterns.iter().filter(|p| !p.contains(PREFIX_PLACEHOLDER)) {
                        tracing::warn!(pattern = %p, "pattern has no {{prefix}} placeholder");
                    }
                    Ok(FilenameStrategy::FixedList(patterns.clone()))
                }
                _ => Ok(FilenameStrategy::default()),
            },
            StrategyKind::SingleGuess => Ok(FilenameStrategy::SingleGuess),
            StrategyKind::Handle => {
                if self.sheet.handle_column.is_none() {
                    anyhow::bail!("handle strategy needs sheet.handle_column in config");
                }
                Ok(FilenameStrategy::Handle)
            }
            StrategyKind::Listing => {
                let path = self
                    .listing_path
                    .as_ref()
                    .ok_or_else(|| anyhow::anyhow!("listing strategy needs listing_path in config"))?;
                let text = fs::read_to_string(path)
                    .with_context(|| format!("read CDN listing {}", path.display()))?;
                let listing = CdnListing::parse(&text);
                tracing::info!(entries = listing.len(), path = %path.display(), "loaded CDN listing");
                Ok(FilenameStrategy::Listing(listing))
            }
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("skuimg")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SkuImgConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SkuImgConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<SkuImgConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: SkuImgConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
