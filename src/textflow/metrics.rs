//! # Text Statistics
//!
//! Pure counting over a text snapshot. Nothing here can fail: absent input is the
//! empty string and every count is defined for it.
//!
//! Characters are counted as Unicode scalar values (`char`), which is also the
//! unit used for title truncation and every length limit in the crate. The two
//! counts persisted on a history ([`char_count`] and [`line_count`]) are exposed
//! as standalone functions so the store path and the statistics path cannot
//! drift apart.
//!
//! Line counting keeps trailing empty segments: `"a\nb\n"` is three lines.

use serde::Serialize;

pub const TWEET_LIMIT: usize = 140;
pub const INSTAGRAM_LIMIT: usize = 2200;
/// Characters on one manuscript page (a 20x20 genkō yōshi sheet).
pub const MANUSCRIPT_PAGE_CHARS: usize = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    pub total_chars: usize,
    pub total_chars_without_whitespace: usize,
    pub byte_length: usize,
    pub line_count: usize,
    pub word_count: usize,
    pub paragraph_count: usize,
    pub manuscript_pages: usize,
    pub tweet_remaining: usize,
    pub instagram_remaining: usize,
}

impl TextStats {
    /// Characters left before `limit` is reached, floored at zero.
    pub fn remaining_for(&self, limit: usize) -> usize {
        remaining_for_limit(self.total_chars, limit)
    }
}

pub fn compute(text: &str) -> TextStats {
    let total_chars = char_count(text);
    TextStats {
        total_chars,
        total_chars_without_whitespace: text.chars().filter(|c| !c.is_whitespace()).count(),
        byte_length: text.len(),
        line_count: line_count(text),
        word_count: word_count(text),
        paragraph_count: paragraph_count(text),
        manuscript_pages: total_chars.div_ceil(MANUSCRIPT_PAGE_CHARS),
        tweet_remaining: remaining_for_limit(total_chars, TWEET_LIMIT),
        instagram_remaining: remaining_for_limit(total_chars, INSTAGRAM_LIMIT),
    }
}

pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

pub fn line_count(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    text.split('\n').count()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Counts runs of non-blank lines. A blank line (empty or whitespace only)
/// between two newlines separates paragraphs; several in a row act as one.
pub fn paragraph_count(text: &str) -> usize {
    let mut count = 0;
    let mut in_paragraph = false;
    for line in text.split('\n') {
        let blank = line.trim().is_empty();
        if !blank && !in_paragraph {
            count += 1;
        }
        in_paragraph = !blank;
    }
    count
}

pub fn remaining_for_limit(total_chars: usize, limit: usize) -> usize {
    limit.saturating_sub(total_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_all_zero_except_remainders() {
        let stats = compute("");
        assert_eq!(stats.total_chars, 0);
        assert_eq!(stats.byte_length, 0);
        assert_eq!(stats.line_count, 0);
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.paragraph_count, 0);
        assert_eq!(stats.manuscript_pages, 0);
        assert_eq!(stats.tweet_remaining, 140);
        assert_eq!(stats.instagram_remaining, 2200);
    }

    #[test]
    fn byte_length_matches_chars_for_ascii() {
        let stats = compute("plain ascii text");
        assert_eq!(stats.byte_length, stats.total_chars);
    }

    #[test]
    fn byte_length_exceeds_chars_for_multibyte() {
        let stats = compute("文字数カウント");
        assert_eq!(stats.total_chars, 7);
        assert_eq!(stats.byte_length, 21);
        assert!(stats.byte_length > stats.total_chars);
    }

    #[test]
    fn astral_characters_count_once() {
        let stats = compute("😀a");
        assert_eq!(stats.total_chars, 2);
        assert_eq!(stats.byte_length, 5);
        assert_eq!(stats.tweet_remaining, TWEET_LIMIT - 2);
        assert_eq!(char_count("😀"), 1);
    }

    #[test]
    fn whitespace_is_stripped_including_unicode_spaces() {
        let stats = compute("a b\tc\nd\u{3000}e");
        assert_eq!(stats.total_chars, 9);
        assert_eq!(stats.total_chars_without_whitespace, 5);
    }

    #[test]
    fn line_count_keeps_trailing_empty_line() {
        assert_eq!(line_count("a\nb\nc"), 3);
        assert_eq!(line_count("a\nb\nc\n"), 4);
        assert_eq!(line_count(""), 0);
        assert_eq!(line_count("single"), 1);
        assert_eq!(line_count("\n"), 2);
    }

    #[test]
    fn word_count_ignores_surrounding_whitespace() {
        assert_eq!(word_count("  hello   world  "), 2);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("\t\n"), 0);
        assert_eq!(word_count("one\ttwo\nthree"), 3);
    }

    #[test]
    fn paragraph_count_splits_on_blank_lines() {
        assert_eq!(paragraph_count("p1\n\np2\n\n\np3"), 3);
        assert_eq!(paragraph_count(""), 0);
        assert_eq!(paragraph_count("   \n   "), 0);
        assert_eq!(paragraph_count("p1\n   \np2"), 2);
        assert_eq!(paragraph_count("line one\nline two"), 1);
        assert_eq!(paragraph_count("p1\n\n"), 1);
        assert_eq!(paragraph_count("p1\r\n\r\np2"), 2);
    }

    #[test]
    fn manuscript_pages_round_up() {
        assert_eq!(compute(&"a".repeat(400)).manuscript_pages, 1);
        assert_eq!(compute(&"a".repeat(401)).manuscript_pages, 2);
        assert_eq!(compute(&" ".repeat(400)).manuscript_pages, 1);
    }

    #[test]
    fn remaining_never_goes_negative() {
        assert_eq!(compute(&"a".repeat(140)).remaining_for(TWEET_LIMIT), 0);
        assert_eq!(compute(&"a".repeat(141)).remaining_for(TWEET_LIMIT), 0);
        assert_eq!(compute(&"a".repeat(50)).remaining_for(TWEET_LIMIT), 90);
        assert_eq!(compute(&"a".repeat(50)).instagram_remaining, 2150);
    }

    #[test]
    fn persisted_counts_agree_with_full_stats() {
        let text = "first\n\nsecond line\n";
        let stats = compute(text);
        assert_eq!(stats.total_chars, char_count(text));
        assert_eq!(stats.line_count, line_count(text));
    }
}
