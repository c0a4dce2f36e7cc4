//! `skuimg run` – resolve the sheet and write results back.

use anyhow::{Context, Result};
use skuimg_core::batch::BatchRunner;
use skuimg_core::config::SkuImgConfig;
use skuimg_core::engine::ResolutionEngine;
use skuimg_core::probe::CurlProber;
use skuimg_core::sheet::JsonSheetStore;
use skuimg_core::sync::{sync_sheet, SyncReport};
use std::path::Path;
use std::time::Instant;

pub async fn run_sync(cfg: &SkuImgConfig, sheet: Option<&Path>, dry_run: bool) -> Result<()> {
    let path = sheet
        .map(Path::to_path_buf)
        .or_else(|| cfg.sheet.path.clone())
        .ok_or_else(|| anyhow::anyhow!("no sheet store: pass --sheet or set sheet.path in config"))?;

    let strategy = cfg.build_strategy()?;
    let prober = CurlProber::new(cfg.connect_timeout(), cfg.probe_timeout());
    let engine = ResolutionEngine::new(prober, strategy, &cfg.cdn_base_url, cfg.engine_options())?;
    tracing::info!(
        strategy = engine.strategy().name(),
        base = %engine.base_url(),
        max_concurrent = cfg.max_concurrent_probes,
        "starting run"
    );
    let runner = BatchRunner::new(engine);
    let store = JsonSheetStore::open(&path);

    let started = Instant::now();
    let report = sync_sheet(&store, &cfg.sheet, &cfg.markers, &runner, dry_run)
        .await
        .with_context(|| format!("sync sheet {}", path.display()))?;

    if dry_run {
        print_outputs(&report, cfg);
    }
    if report.rows == 0 {
        println!("No SKU rows found.");
    } else {
        println!(
            "{} {} row(s): {} found, {} not found ({:.1}s){}",
            if report.written { "Updated" } else { "Resolved" },
            report.rows,
            report.found,
            report.not_found,
            started.elapsed().as_secs_f64(),
            if dry_run { " [dry run]" } else { "" }
        );
    }
    Ok(())
}

fn print_outputs(report: &SyncReport, cfg: &SkuImgConfig) {
    println!("{:<6} {:<6} {}", "ROW", "STATUS", "URL");
    for o in &report.outputs {
        println!(
            "{:<6} {:<6} {}",
            o.row_index,
            cfg.markers.render(o.status),
            if o.url.is_empty() { "-" } else { o.url.as_str() }
        );
    }
}
