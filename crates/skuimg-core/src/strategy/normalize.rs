//! Handle normalization for handle-based filenames.

/// Normalize a product handle into a filename fragment.
///
/// Keeps ASCII letters, digits and spaces, then joins the surviving words
/// with `_`. Underscores count as word separators so that normalizing an
/// already-normalized handle is a no-op.
pub fn normalize_handle(handle: &str) -> String {
    let kept: String = handle
        .trim()
        .chars()
        .map(|c| if c == '_' { ' ' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_joins_words() {
        assert_eq!(normalize_handle("Olive Oil! #1"), "Olive_Oil_1");
        assert_eq!(normalize_handle("  Extra   Virgin  "), "Extra_Virgin");
    }

    #[test]
    fn punctuation_only_becomes_empty() {
        assert_eq!(normalize_handle("!!! ###"), "");
        assert_eq!(normalize_handle(""), "");
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        assert_eq!(normalize_handle("Crème Brûlée"), "Crme_Brle");
    }

    #[test]
    fn tabs_and_newlines_are_not_separators() {
        // Only plain spaces survive the character filter.
        assert_eq!(normalize_handle("Olive\tOil"), "OliveOil");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["Olive Oil! #1", "  a  b  c ", "x_y z", "Crème Brûlée", "@@@"] {
            let once = normalize_handle(raw);
            assert_eq!(normalize_handle(&once), once, "input {raw:?}");
        }
    }
}
