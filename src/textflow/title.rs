/// Number of characters kept from the content when a title is inferred.
pub const INFERRED_TITLE_CHARS: usize = 30;
pub const ELLIPSIS: &str = "...";

/// Picks the display title for a history.
///
/// A non-empty supplied title wins untouched. Otherwise the content is used,
/// cut to its first 30 characters plus `"..."` when longer than that. The cut
/// counts `char`s and ignores word boundaries.
pub fn derive_title(supplied: Option<&str>, content: &str) -> String {
    if let Some(title) = supplied.filter(|t| !t.is_empty()) {
        return title.to_string();
    }

    match content.char_indices().nth(INFERRED_TITLE_CHARS) {
        Some((cut, _)) => format!("{}{}", &content[..cut], ELLIPSIS),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_used_verbatim() {
        let content = "a".repeat(25);
        assert_eq!(derive_title(None, &content), content);
    }

    #[test]
    fn exactly_thirty_chars_is_not_truncated() {
        let content = "b".repeat(30);
        assert_eq!(derive_title(None, &content), content);
    }

    #[test]
    fn long_content_is_cut_with_ellipsis() {
        let content = format!("{}{}", "x".repeat(30), "tail!");
        assert_eq!(derive_title(None, &content), format!("{}...", "x".repeat(30)));
    }

    #[test]
    fn supplied_title_always_wins() {
        let content = "c".repeat(35);
        assert_eq!(derive_title(Some("Mine"), &content), "Mine");
        assert_eq!(derive_title(Some("  padded  "), "short"), "  padded  ");
    }

    #[test]
    fn empty_supplied_title_falls_back_to_content() {
        assert_eq!(derive_title(Some(""), "body"), "body");
        assert_eq!(derive_title(None, ""), "");
    }

    #[test]
    fn cut_counts_characters_not_bytes() {
        let content = "あ".repeat(31);
        let title = derive_title(None, &content);
        assert_eq!(title, format!("{}...", "あ".repeat(30)));
    }

    #[test]
    fn astral_characters_are_never_split() {
        let content = "😀".repeat(31);
        let title = derive_title(None, &content);
        assert_eq!(title, format!("{}...", "😀".repeat(30)));
        assert_eq!(derive_title(None, &"😀".repeat(30)), "😀".repeat(30));
    }

    #[test]
    fn newlines_count_as_characters() {
        let content = format!("{}\n{}", "l".repeat(29), "next line here");
        let title = derive_title(None, &content);
        assert_eq!(title, format!("{}\n...", "l".repeat(29)));
    }
}
