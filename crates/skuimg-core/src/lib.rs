//! Resolve product SKUs to CDN image URLs.
//!
//! Pipeline: sheet rows → [`record::InputRecord`] → [`engine::ResolutionEngine`]
//! (filename [`strategy`], [`probe`], per-run [`cache::PrefixCache`]) driven by
//! [`batch::BatchRunner`] → [`record::OutputRecord`] → URL and status columns.

pub mod config;
pub mod logging;

pub mod batch;
pub mod cache;
pub mod engine;
pub mod probe;
pub mod record;
pub mod sheet;
pub mod strategy;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;
