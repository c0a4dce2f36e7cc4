//! Scripted prober for engine and batch tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::probe::{Prober, Reachability};

#[derive(Debug, Default)]
struct Script {
    reachable: HashSet<String>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Answers from a fixed set of reachable URLs and records every call.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProber {
    script: Arc<Script>,
}

impl ScriptedProber {
    pub fn reachable<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(urls, HashMap::new(), Duration::ZERO)
    }

    pub fn build<I, S>(urls: I, delays: HashMap<String, Duration>, default_delay: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Arc::new(Script {
                reachable: urls.into_iter().map(Into::into).collect(),
                delays,
                default_delay,
                ..Script::default()
            }),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.script.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.script.calls.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.script.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Prober for ScriptedProber {
    async fn probe(&self, url: &str) -> Reachability {
        let script = &self.script;
        script.calls.lock().unwrap().push(url.to_string());
        let now = script.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        script.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = script.delays.get(url).copied().unwrap_or(script.default_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        script.in_flight.fetch_sub(1, Ordering::SeqCst);
        if script.reachable.contains(url) {
            Reachability::Reachable
        } else {
            Reachability::Unreachable
        }
    }
}
