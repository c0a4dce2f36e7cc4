//! HEAD probe backed by libcurl (`curl` crate).

use std::time::Duration;

use super::{Prober, Reachability};

/// Prober issuing a HEAD request per URL on the blocking pool.
#[derive(Debug, Clone)]
pub struct CurlProber {
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlProber {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            connect_timeout,
            timeout,
        }
    }
}

impl Default for CurlProber {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_secs(5))
    }
}

impl Prober for CurlProber {
    async fn probe(&self, url: &str) -> Reachability {
        let task = tokio::task::spawn_blocking({
            let url = url.to_string();
            let (connect_timeout, timeout) = (self.connect_timeout, self.timeout);
            move || head_status(&url, connect_timeout, timeout)
        });

        match task.await {
            Ok(Ok(code)) => {
                tracing::debug!(url, code, "HEAD completed");
                Reachability::from_status(code)
            }
            Ok(Err(e)) => {
                tracing::debug!(url, error = %e, "HEAD failed");
                Reachability::Unreachable
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "probe task join");
                Reachability::Unreachable
            }
        }
    }
}

/// Performs a HEAD request and returns the final HTTP status code.
///
/// Follows redirects. Runs in the current thread; call from `spawn_blocking`
/// if used from async code.
pub fn head_status(
    url: &str,
    connect_timeout: Duration,
    timeout: Duration,
) -> Result<u32, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.connect_timeout(connect_timeout)?;
    easy.timeout(timeout)?;
    easy.perform()?;
    easy.response_code()
}
