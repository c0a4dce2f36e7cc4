//! `skuimg probe <url>` – single existence check.

use anyhow::Result;
use skuimg_core::config::SkuImgConfig;
use skuimg_core::probe::{CurlProber, Prober, Reachability};

pub async fn run_probe(cfg: &SkuImgConfig, url: &str) -> Result<()> {
    let prober = CurlProber::new(cfg.connect_timeout(), cfg.probe_timeout());
    let outcome = tokio::time::timeout(cfg.probe_timeout(), prober.probe(url))
        .await
        .unwrap_or(Reachability::Unreachable);
    let status = match outcome {
        Reachability::Reachable => cfg.markers.found.as_str(),
        Reachability::Unreachable => cfg.markers.not_found.as_str(),
    };
    println!("{status} {url} ({outcome:?})");
    Ok(())
}
