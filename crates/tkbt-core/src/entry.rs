//! Structural extraction of a raw dictionary entry.
//!
//! A raw entry is a comma-separated list of written forms:
//! `primary[, reading][, alternate, ...]`. Segments are positional. The
//! second segment is a reading only when it is written purely in kana;
//! otherwise it is the first alternate form.

use tracing::debug;

use crate::unicode::{is_entry_char, is_kana_only};

/// Separator used when alternate forms are joined back together.
pub const ALTERNATE_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("malformed entry (no kanji or kana at the start): {entry:?}")]
    Malformed { entry: String },
}

/// The three structural parts of a raw entry, borrowed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryParts<'a> {
    pub primary: &'a str,
    pub reading: Option<&'a str>,
    pub alternates: Option<String>,
}

/// Split `raw` into primary form, reading and alternate forms.
pub fn extract_parts(raw: &str) -> Result<EntryParts<'_>, EntryError> {
    let mut segments = raw.split(',').map(str::trim).filter(|s| !s.is_empty());

    let primary = segments.next().map(leading_entry_run).unwrap_or_default();
    if primary.is_empty() {
        debug!(entry = raw, "no primary form");
        return Err(EntryError::Malformed {
            entry: raw.to_string(),
        });
    }

    let mut rest: Vec<&str> = segments.collect();
    let reading = if rest.first().is_some_and(|seg| is_kana_only(seg)) {
        Some(rest.remove(0))
    } else {
        None
    };
    let alternates = if rest.is_empty() {
        None
    } else {
        Some(rest.join(ALTERNATE_SEPARATOR))
    };

    Ok(EntryParts {
        primary,
        reading,
        alternates,
    })
}

/// The maximal prefix of `segment` made of kanji/kana characters.
fn leading_entry_run(segment: &str) -> &str {
    let end = segment
        .char_indices()
        .find(|&(_, c)| !is_entry_char(c))
        .map_or(segment.len(), |(i, _)| i);
    &segment[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_segment() {
        let parts = extract_parts("開始").unwrap();
        assert_eq!(parts.primary, "開始");
        assert_eq!(parts.reading, None);
        assert_eq!(parts.alternates, None);
    }

    #[test]
    fn primary_and_reading() {
        let parts = extract_parts("でか, デカ").unwrap();
        assert_eq!(parts.primary, "でか");
        assert_eq!(parts.reading, Some("デカ"));
        assert_eq!(parts.alternates, None);
    }

    #[test]
    fn primary_reading_and_alternate() {
        let parts = extract_parts("締め上げる, しめあげる, 絞め上げる").unwrap();
        assert_eq!(parts.primary, "締め上げる");
        assert_eq!(parts.reading, Some("しめあげる"));
        assert_eq!(parts.alternates.as_deref(), Some("絞め上げる"));
    }

    #[test]
    fn multiple_alternates_keep_order() {
        let parts =
            extract_parts("着信メロディ, ちゃくしんメロディ, 着信メロディー, ちゃくしんメロディー")
                .unwrap();
        assert_eq!(parts.primary, "着信メロディ");
        assert_eq!(parts.reading, Some("ちゃくしんメロディ"));
        assert_eq!(
            parts.alternates.as_deref(),
            Some("着信メロディー, ちゃくしんメロディー")
        );
    }

    #[test]
    fn kanji_second_segment_is_alternate() {
        let parts = extract_parts("居眠り, 居睡り").unwrap();
        assert_eq!(parts.primary, "居眠り");
        assert_eq!(parts.reading, None);
        assert_eq!(parts.alternates.as_deref(), Some("居睡り"));
    }

    #[test]
    fn whitespace_around_commas_is_ignored() {
        let parts = extract_parts("  居眠り ,いねむり,   居睡り ").unwrap();
        assert_eq!(parts.primary, "居眠り");
        assert_eq!(parts.reading, Some("いねむり"));
        assert_eq!(parts.alternates.as_deref(), Some("居睡り"));
    }

    #[test]
    fn empty_segments_are_skipped() {
        let parts = extract_parts("居眠り, , いねむり").unwrap();
        assert_eq!(parts.reading, Some("いねむり"));
        assert_eq!(parts.alternates, None);
    }

    #[test]
    fn prolonged_mark_continues_primary() {
        let parts = extract_parts("ラーメン, らーめん").unwrap();
        assert_eq!(parts.primary, "ラーメン");
        assert_eq!(parts.reading, Some("らーめん"));
    }

    #[test]
    fn trailing_noise_in_primary_segment_is_dropped() {
        let parts = extract_parts("開始(する)").unwrap();
        assert_eq!(parts.primary, "開始");
    }

    #[test]
    fn malformed_entries() {
        for raw in ["", "   ", ",", "deka", "123, でか", "(開始)"] {
            assert_eq!(
                extract_parts(raw),
                Err(EntryError::Malformed {
                    entry: raw.to_string()
                }),
                "expected malformed for {raw:?}"
            );
        }
    }
}
