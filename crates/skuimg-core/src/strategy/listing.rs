//! Known CDN directory listing used by the listing strategy.

/// Filenames known to exist in the CDN directory, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CdnListing {
    entries: Vec<String>,
}

impl CdnListing {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Parse a listing with one filename per line. Blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(|l| l.rsplit('/').next().unwrap_or(l).to_string())
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose name starts with `prefix`, in listing order.
    pub fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(move |name| name.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_blanks_and_comments() {
        let listing = CdnListing::parse("# exported 2024-05-01\nABCDE-1.jpg\n\n  XYZAB.jpg  \n");
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.matching("XYZAB").collect::<Vec<_>>(), vec!["XYZAB.jpg"]);
    }

    #[test]
    fn parse_keeps_only_last_path_segment() {
        let listing = CdnListing::parse("https://cdn.example.com/files/ABCDE.jpg\n");
        assert_eq!(listing.matching("ABCDE").collect::<Vec<_>>(), vec!["ABCDE.jpg"]);
    }

    #[test]
    fn matching_preserves_listing_order() {
        let listing = CdnListing::new(vec![
            "ABCDE-b.jpg".into(),
            "ZZZZZ.jpg".into(),
            "ABCDE-a.jpg".into(),
        ]);
        assert_eq!(
            listing.matching("ABCDE").collect::<Vec<_>>(),
            vec!["ABCDE-b.jpg", "ABCDE-a.jpg"]
        );
        assert_eq!(listing.matching("QQQQQ").count(), 0);
    }
}
