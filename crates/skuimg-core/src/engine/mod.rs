//! Resolution engine: turns one input row into one output row.
//!
//! Per row: validate, take the prefix, consult the prefix cache, and on a
//! miss probe the strategy's candidates in order until one is reachable.
//! Nothing here returns an error; every failure becomes a not-found output
//! plus a log line naming the row, prefix and attempted filenames.

mod validate;

pub use validate::{validate, InvalidInput};

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use url::Url;

use crate::cache::PrefixCache;
use crate::probe::{Prober, Reachability};
use crate::record::{InputRecord, OutputRecord, ResolutionResult};
use crate::strategy::FilenameStrategy;

/// Probe limits applied by the engine around every prober call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Maximum outstanding probes across all rows.
    pub max_concurrent_probes: usize,
    /// Per-probe deadline; expiry counts as unreachable.
    pub probe_timeout: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_concurrent_probes: 16,
            probe_timeout: Duration::from_secs(5),
        }
    }
}

pub struct ResolutionEngine<P> {
    prober: P,
    strategy: FilenameStrategy,
    base_url: Url,
    probe_timeout: Duration,
    permits: Semaphore,
}

impl<P: Prober> ResolutionEngine<P> {
    pub fn new(
        prober: P,
        strategy: FilenameStrategy,
        cdn_base_url: &str,
        options: EngineOptions,
    ) -> Result<Self> {
        Ok(Self {
            prober,
            strategy,
            base_url: parse_base_url(cdn_base_url)?,
            probe_timeout: options.probe_timeout,
            permits: Semaphore::new(options.max_concurrent_probes.max(1)),
        })
    }

    pub fn strategy(&self) -> &FilenameStrategy {
        &self.strategy
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for a candidate filename: the base string with the filename
    /// appended. `None` when the result would leave the base directory, e.g.
    /// a `:`, `//` or `../` in the filename changing scheme, host or path.
    pub fn candidate_url(&self, filename: &str) -> Option<String> {
        let url = Url::parse(&format!("{}{}", self.base_url.as_str(), filename)).ok()?;
        let base = &self.base_url;
        let contained = url.scheme() == base.scheme()
            && url.host_str() == base.host_str()
            && url.port_or_known_default() == base.port_or_known_default()
            && url.path().starts_with(base.path())
            && url.query() == base.query()
            && url.fragment().is_none();
        contained.then(|| url.into())
    }

    /// Resolve one row, consulting and populating `cache`.
    pub async fn resolve(&self, record: &InputRecord, cache: &PrefixCache) -> OutputRecord {
        let prefix = match validate(record, self.strategy.requires_handle()) {
            Ok(prefix) => prefix,
            Err(reason) => {
                tracing::warn!(row = record.row_index, %reason, "row skipped");
                return OutputRecord::unresolved(record.row_index);
            }
        };

        if let Some(hit) = cache.get(prefix) {
            tracing::debug!(row = record.row_index, prefix, "prefix cache hit");
            return OutputRecord::from_result(record.row_index, &hit);
        }

        let result = cache
            .get_or_resolve(prefix, self.resolve_prefix(record, prefix))
            .await;
        OutputRecord::from_result(record.row_index, &result)
    }

    async fn resolve_prefix(&self, record: &InputRecord, prefix: &str) -> ResolutionResult {
        let candidates = self.strategy.candidates(prefix, record.handle.as_deref());
        let mut attempted = Vec::with_capacity(candidates.len());

        for filename in &candidates {
            attempted.push(filename.as_str());
            let Some(url) = self.candidate_url(filename) else {
                tracing::debug!(
                    row = record.row_index,
                    prefix,
                    filename = %filename,
                    "candidate URL leaves the CDN base, skipped"
                );
                continue;
            };
            if self.probe_bounded(&url).await.is_reachable() {
                tracing::debug!(row = record.row_index, prefix, url = %url, "resolved");
                return ResolutionResult::found(url);
            }
        }

        tracing::warn!(
            row = record.row_index,
            prefix,
            strategy = self.strategy.name(),
            attempted = ?attempted,
            "no candidate reachable"
        );
        ResolutionResult::unresolved()
    }

    async fn probe_bounded(&self, url: &str) -> Reachability {
        let Ok(_permit) = self.permits.acquire().await else {
            return Reachability::Unreachable;
        };
        match tokio::time::timeout(self.probe_timeout, self.prober.probe(url)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::debug!(url, timeout = ?self.probe_timeout, "probe timed out");
                Reachability::Unreachable
            }
        }
    }
}

/// Parse the CDN base, forcing a trailing `/` so filenames join under it.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut base = raw.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let url = Url::parse(&base).with_context(|| format!("invalid CDN base URL: {raw}"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("CDN base URL cannot hold paths: {raw}");
    }
    Ok(url)
}
