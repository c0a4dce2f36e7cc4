//! Existence probing for candidate URLs.
//!
//! A probe never fails: transport errors, timeouts and non-2xx statuses all
//! collapse to `Reachability::Unreachable` so one missing asset cannot abort
//! a batch.

mod head;

use std::future::Future;

pub use head::{head_status, CurlProber};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Reachable,
    Unreachable,
}

impl Reachability {
    /// Reachable only for an explicit 2xx status.
    pub fn from_status(code: u32) -> Self {
        if (200..300).contains(&code) {
            Reachability::Reachable
        } else {
            Reachability::Unreachable
        }
    }

    pub fn is_reachable(self) -> bool {
        self == Reachability::Reachable
    }
}

/// Metadata-only existence check against a URL.
pub trait Prober: Send + Sync + 'static {
    fn probe(&self, url: &str) -> impl Future<Output = Reachability> + Send;
}
