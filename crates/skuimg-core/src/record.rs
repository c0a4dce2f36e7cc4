//! Input and output records flowing through the resolution engine.

/// Number of leading identifier characters used as the dedup key.
pub const PREFIX_LEN: usize = 5;

/// One product row read from the sheet. Order-significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    /// Product SKU.
    pub identifier: String,
    /// Product title/handle, when the layout has a handle column.
    pub handle: Option<String>,
    /// 1-based sheet row this record was read from.
    pub row_index: u32,
}

impl InputRecord {
    pub fn new(identifier: impl Into<String>, row_index: u32) -> Self {
        Self {
            identifier: identifier.into(),
            handle: None,
            row_index,
        }
    }

    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }
}

/// Outcome of resolving one prefix. Shared verbatim by every row with that prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolutionResult {
    /// Resolved asset URL; empty when nothing was reachable.
    pub url: String,
    pub found: bool,
}

impl ResolutionResult {
    pub fn found(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            found: true,
        }
    }

    pub fn unresolved() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMarker {
    Found,
    NotFound,
}

impl From<bool> for StatusMarker {
    fn from(found: bool) -> Self {
        if found {
            StatusMarker::Found
        } else {
            StatusMarker::NotFound
        }
    }
}

/// One output pair per input row, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub row_index: u32,
    pub url: String,
    pub status: StatusMarker,
}

impl OutputRecord {
    pub fn from_result(row_index: u32, result: &ResolutionResult) -> Self {
        Self {
            row_index,
            url: result.url.clone(),
            status: result.found.into(),
        }
    }

    pub fn unresolved(row_index: u32) -> Self {
        Self::from_result(row_index, &ResolutionResult::unresolved())
    }

    pub fn is_found(&self) -> bool {
        self.status == StatusMarker::Found
    }
}

/// First `PREFIX_LEN` characters of `identifier`, or `None` if it is shorter.
pub fn prefix_of(identifier: &str) -> Option<&str> {
    match identifier.char_indices().nth(PREFIX_LEN) {
        Some((end, _)) => Some(&identifier[..end]),
        None if identifier.chars().count() == PREFIX_LEN => Some(identifier),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_takes_first_five_chars() {
        assert_eq!(prefix_of("ABCDE1234"), Some("ABCDE"));
        assert_eq!(prefix_of("ABCDE"), Some("ABCDE"));
        assert_eq!(prefix_of("AB1"), None);
        assert_eq!(prefix_of(""), None);
    }

    #[test]
    fn prefix_counts_chars_not_bytes() {
        assert_eq!(prefix_of("ÀÉÎÕÜx"), Some("ÀÉÎÕÜ"));
        assert_eq!(prefix_of("ÀÉÎÕ"), None);
    }

    #[test]
    fn unresolved_output_is_empty_not_found() {
        let out = OutputRecord::unresolved(7);
        assert_eq!(out.row_index, 7);
        assert!(out.url.is_empty());
        assert_eq!(out.status, StatusMarker::NotFound);
        assert!(!out.is_found());
    }
}
