//! Filename strategies: derive ordered candidate filenames from a SKU prefix.
//!
//! Pure and deterministic. Candidate order is probe priority.

mod listing;
mod normalize;

pub use listing::CdnListing;
pub use normalize::normalize_handle;

/// Placeholder replaced by the SKU prefix in fixed-list patterns.
pub const PREFIX_PLACEHOLDER: &str = "{prefix}";

/// Default fixed-list patterns, in probe order.
pub const DEFAULT_PATTERNS: [&str; 4] = [
    "{prefix}.jpg",
    "{prefix}-1.jpg",
    "{prefix}-product.jpg",
    "{prefix}-Olive_Oil.jpg",
];

/// Selectable filename strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenameStrategy {
    /// Expand each pattern in order.
    FixedList(Vec<String>),
    /// Only `{prefix}.jpg`.
    SingleGuess,
    /// `{prefix}-{normalized handle}.jpg`; rows must carry a handle.
    Handle,
    /// Entries of a known CDN listing that start with the prefix.
    Listing(CdnListing),
}

impl Default for FilenameStrategy {
    fn default() -> Self {
        FilenameStrategy::FixedList(DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect())
    }
}

impl FilenameStrategy {
    /// Whether rows must carry a non-empty handle to be resolvable.
    pub fn requires_handle(&self) -> bool {
        matches!(self, FilenameStrategy::Handle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilenameStrategy::FixedList(_) => "fixed_list",
            FilenameStrategy::SingleGuess => "single_guess",
            FilenameStrategy::Handle => "handle",
            FilenameStrategy::Listing(_) => "listing",
        }
    }

    /// Ordered candidate filenames for `prefix`.
    ///
    /// The handle strategy without a handle falls back to the default fixed list.
    pub fn candidates(&self, prefix: &str, handle: Option<&str>) -> Vec<String> {
        match self {
            FilenameStrategy::FixedList(patterns) => {
                expand_patterns(patterns.as_slice(), prefix)
            }
            FilenameStrategy::SingleGuess => vec![format!("{prefix}.jpg")],
            FilenameStrategy::Handle => generate_candidates(prefix, handle),
            FilenameStrategy::Listing(listing) => {
                listing.matching(prefix).map(str::to_string).collect()
            }
        }
    }
}

/// Default candidate generation: one handle-based filename when a handle is
/// given, otherwise the default fixed list.
pub fn generate_candidates(prefix: &str, handle: Option<&str>) -> Vec<String> {
    match handle {
        Some(handle) => vec![format!("{prefix}-{}.jpg", normalize_handle(handle))],
        None => expand_patterns(&DEFAULT_PATTERNS, prefix),
    }
}

fn expand_patterns<S: AsRef<str>>(patterns: &[S], prefix: &str) -> Vec<String> {
    patterns
        .iter()
        .map(|p| p.as_ref().replace(PREFIX_PLACEHOLDER, prefix))
        .collect()
}
