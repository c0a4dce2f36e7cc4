//! `skuimg candidates <sku>` – show what would be probed, without network access.

use anyhow::Result;
use skuimg_core::config::SkuImgConfig;
use skuimg_core::engine::{validate, ResolutionEngine};
use skuimg_core::probe::CurlProber;
use skuimg_core::record::InputRecord;

pub fn run_candidates(cfg: &SkuImgConfig, sku: &str, handle: Option<&str>) -> Result<()> {
    let strategy = cfg.build_strategy()?;
    let engine = ResolutionEngine::new(
        CurlProber::default(),
        strategy,
        &cfg.cdn_base_url,
        cfg.engine_options(),
    )?;

    let mut record = InputRecord::new(sku, cfg.sheet.start_row);
    record.handle = handle.map(str::to_string);
    let prefix = validate(&record, engine.strategy().requires_handle())
        .map_err(|reason| anyhow::anyhow!("{sku:?}: {reason}"))?;

    println!("prefix: {prefix}  strategy: {}", engine.strategy().name());
    let candidates = engine.strategy().candidates(prefix, handle);
    if candidates.is_empty() {
        println!("  (no candidates)");
    }
    for (i, filename) in candidates.iter().enumerate() {
        match engine.candidate_url(filename) {
            Some(url) => println!("  {}. {}", i + 1, url),
            None => println!("  {}. {} (outside the CDN base, skipped)", i + 1, filename),
        }
    }
    Ok(())
}
