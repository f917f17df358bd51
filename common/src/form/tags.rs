/// Splits the comma-separated tag string of the form into a tag list.
///
/// Segments are trimmed and empty ones dropped, so `"a, ,b,"` yields
/// `["a", "b"]`. Duplicates are kept; the backend deduplicates tag names.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`parse_tags`] for display in the editable field.
pub fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_empty_segments_and_trims() {
        assert_eq!(parse_tags("tech, blog, , ai,"), vec!["tech", "blog", "ai"]);
        assert_eq!(parse_tags("a, ,b,"), vec!["a", "b"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,, ").is_empty());
    }

    #[test]
    fn join_uses_comma_space() {
        assert_eq!(join_tags(&["tech", "ai"]), "tech, ai");
        assert_eq!(join_tags::<&str>(&[]), "");
    }
}
