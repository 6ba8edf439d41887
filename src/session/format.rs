use std::borrow::Cow;

use icu_normalizer::ComposingNormalizerBorrowed;
use regex::RegexBuilder;

/// Normalize a sentence the way transcripts are stored: NFC, trimmed, first
/// letter upper-cased, ending in a period. Idempotent.
pub fn format_transcript(text: &str) -> String {
    let normalized = ComposingNormalizerBorrowed::new_nfc().normalize(text);
    let trimmed = normalized.trim();
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut formatted: String = first.to_uppercase().collect();
    formatted.push_str(chars.as_str());
    if !formatted.ends_with('.') {
        formatted.push('.');
    }
    formatted
}

/// Exact comparison: case, accents, spacing and punctuation all count.
pub fn sentences_match(expected: &str, transcript: &str) -> bool {
    expected == transcript
}

/// Split `text` into `(segment, is_keyword)` pieces, marking every
/// case-insensitive occurrence of `keyword`.
pub fn highlight_segments<'a>(text: &'a str, keyword: &str) -> Vec<(Cow<'a, str>, bool)> {
    let keyword = keyword.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if keyword.is_empty() {
        return vec![(Cow::Borrowed(text), false)];
    }

    let pattern = match RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(_) => return vec![(Cow::Borrowed(text), false)],
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.start() > last {
            segments.push((Cow::Borrowed(&text[last..m.start()]), false));
        }
        segments.push((Cow::Borrowed(m.as_str()), true));
        last = m.end();
    }
    if last < text.len() {
        segments.push((Cow::Borrowed(&text[last..]), false));
    }
    segments
}
