//! Batch runner: resolve every record concurrently, return outputs in input order.
//!
//! Each record runs as its own task so a panicking or slow row never cancels
//! its siblings. Probe concurrency is bounded inside the engine.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::cache::PrefixCache;
use crate::engine::ResolutionEngine;
use crate::probe::Prober;
use crate::record::{InputRecord, OutputRecord};

pub struct BatchRunner<P> {
    engine: Arc<ResolutionEngine<P>>,
}

impl<P> Clone for BatchRunner<P> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<P: Prober> BatchRunner<P> {
    pub fn new(engine: ResolutionEngine<P>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &ResolutionEngine<P> {
        &self.engine
    }

    /// Resolve `records` with a fresh prefix cache scoped to this call.
    pub async fn run(&self, records: Vec<InputRecord>) -> Vec<OutputRecord> {
        self.run_with_cache(records, Arc::new(PrefixCache::new()))
            .await
    }

    /// Resolve `records` against a caller-supplied cache.
    pub async fn run_with_cache(
        &self,
        records: Vec<InputRecord>,
        cache: Arc<PrefixCache>,
    ) -> Vec<OutputRecord> {
        let rows: Vec<u32> = records.iter().map(|r| r.row_index).collect();
        let mut join_set = JoinSet::new();

        for (idx, record) in records.into_iter().enumerate() {
            let engine = Arc::clone(&self.engine);
            let cache = Arc::clone(&cache);
            join_set.spawn(async move { (idx, engine.resolve(&record, &cache).await) });
        }

        let mut slots: Vec<Option<OutputRecord>> = vec![None; rows.len()];
        while let Some(res) = join_set.join_next().await {
            match res {
                Ok((idx, output)) => slots[idx] = Some(output),
                Err(e) => tracing::warn!(error = %e, "record task join"),
            }
        }

        let outputs: Vec<OutputRecord> = slots
            .into_iter()
            .zip(rows)
            .map(|(slot, row)| slot.unwrap_or_else(|| OutputRecord::unresolved(row)))
            .collect();

        tracing::info!(
            records = outputs.len(),
            found = outputs.iter().filter(|o| o.is_found()).count(),
            prefixes = cache.len(),
            "batch complete"
        );
        outputs
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;
    use crate::engine::EngineOptions;
    use crate::strategy::FilenameStrategy;
    use crate::test_support::ScriptedProber;

    const BASE: &str = "https://cdn.example.com/files/";

    fn runner(prober: &ScriptedProber, max_concurrent_probes: usize) -> BatchRunner<ScriptedProber> {
        let options = EngineOptions {
            max_concurrent_probes,
            ..EngineOptions::default()
        };
        let engine =
            ResolutionEngine::new(prober.clone(), FilenameStrategy::SingleGuess, BASE, options)
                .unwrap();
        BatchRunner::new(engine)
    }

    #[tokio::test]
    async fn output_order_matches_input_despite_latency() {
        let skus: Vec<String> = (0..12).map(|i| format!("SKU{i:02}XX")).collect();
        let mut delays = HashMap::new();
        for (i, sku) in skus.iter().enumerate() {
            let ms = (i as u64 * 37) % 11 * 3;
            delays.insert(format!("{BASE}{}.jpg", &sku[..5]), Duration::from_millis(ms));
        }
        let reachable: Vec<String> = skus
            .iter()
            .step_by(2)
            .map(|s| format!("{BASE}{}.jpg", &s[..5]))
            .collect();
        let prober = ScriptedProber::build(reachable, delays, Duration::ZERO);
        let records: Vec<InputRecord> = skus
            .iter()
            .enumerate()
            .map(|(i, s)| InputRecord::new(s.clone(), 4 + i as u32))
            .collect();

        let outputs = runner(&prober, 16).run(records).await;

        let rows: Vec<u32> = outputs.iter().map(|o| o.row_index).collect();
        assert_eq!(rows, (4..16).collect::<Vec<u32>>());
        for (i, out) in outputs.iter().enumerate() {
            assert_eq!(out.is_found(), i % 2 == 0, "row {}", out.row_index);
        }
    }

    #[tokio::test]
    async fn same_prefix_rows_probe_once_and_share_result() {
        let prober = ScriptedProber::build(
            [format!("{BASE}ABCDE.jpg")],
            HashMap::new(),
            Duration::from_millis(10),
        );
        let records = vec![
            InputRecord::new("ABCDE111", 4),
            InputRecord::new("ABCDExyz", 5),
            InputRecord::new("AB1", 6),
        ];

        let outputs = runner(&prober, 16).run(records).await;

        assert_eq!(prober.call_count(), 1);
        assert_eq!(outputs[0].url, outputs[1].url);
        assert!(outputs[0].is_found() && outputs[1].is_found());
        assert_eq!(outputs[2], OutputRecord::unresolved(6));
    }

    #[tokio::test]
    async fn probe_concurrency_is_bounded() {
        let prober = ScriptedProber::build(
            Vec::<String>::new(),
            HashMap::new(),
            Duration::from_millis(5),
        );
        let records: Vec<InputRecord> = (0..20)
            .map(|i| InputRecord::new(format!("P{i:04}"), i))
            .collect();

        let outputs = runner(&prober, 3).run(records).await;

        assert_eq!(outputs.len(), 20);
        assert_eq!(prober.call_count(), 20);
        assert!(prober.max_in_flight() <= 3, "saw {}", prober.max_in_flight());
    }

    #[tokio::test]
    async fn each_run_starts_with_an_empty_cache() {
        let prober = ScriptedProber::reachable([format!("{BASE}ABCDE.jpg")]);
        let runner = runner(&prober, 4);

        runner.run(vec![InputRecord::new("ABCDE1", 1)]).await;
        runner.run(vec![InputRecord::new("ABCDE2", 1)]).await;

        assert_eq!(prober.call_count(), 2);
    }

    #[tokio::test]
    async fn injected_cache_is_reused() {
        let prober = ScriptedProber::default();
        let cache = Arc::new(PrefixCache::with_entries([(
            "ABCDE",
            crate::record::ResolutionResult::found("https://seed/ABCDE.jpg"),
        )]));

        let outputs = runner(&prober, 4)
            .run_with_cache(vec![InputRecord::new("ABCDE1", 1)], cache)
            .await;

        assert_eq!(outputs[0].url, "https://seed/ABCDE.jpg");
        assert_eq!(prober.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_batch() {
        let outputs = runner(&ScriptedProber::default(), 4).run(Vec::new()).await;
        assert!(outputs.is_empty());
    }
}
