//! Character-level Unicode classification for Japanese dictionary entries.
//!
//! Kana classification covers the letter ranges only (ぁ..ゖ, ァ..ヺ). The
//! prolonged sound mark ー (U+30FC) sits in the Katakana block but is not a
//! letter of either syllabary, so it never makes text "contain katakana".

/// Target syllabary for [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    Hiragana,
    Katakana,
}

/// Result of classifying possibly-absent text.
///
/// `NotApplicable` is produced only when there was no text to classify
/// (e.g. an entry without a reading segment). It is distinct from `Absent`
/// so call sites have to decide what a missing segment means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Absent,
    NotApplicable,
}

impl Presence {
    /// `true` only for [`Presence::Present`]; a missing segment counts as
    /// containing nothing.
    pub fn is_present(self) -> bool {
        matches!(self, Presence::Present)
    }
}

pub const PROLONGED_SOUND_MARK: char = 'ー';

pub fn is_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{3096}').contains(&c)
}

pub fn is_katakana(c: char) -> bool {
    ('\u{30A1}'..='\u{30FA}').contains(&c)
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
        || c == '々'
}

pub fn is_prolonged_mark(c: char) -> bool {
    c == PROLONGED_SOUND_MARK
}

/// Kana letter or the prolonged sound mark.
pub fn is_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c) || is_prolonged_mark(c)
}

/// Characters allowed in a primary written form.
pub fn is_entry_char(c: char) -> bool {
    is_kanji(c) || is_kana(c)
}

/// Check if a string is written in kana only (no kanji, no Latin).
///
/// The prolonged sound mark is accepted so readings like "らーめん" qualify.
pub fn is_kana_only(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_kana)
}

/// Classify `text` against `kind`.
pub fn classify(text: Option<&str>, kind: ScriptKind) -> Presence {
    let Some(text) = text else {
        return Presence::NotApplicable;
    };
    let hit = match kind {
        ScriptKind::Hiragana => text.chars().any(is_hiragana),
        ScriptKind::Katakana => text.chars().any(is_katakana),
    };
    if hit {
        Presence::Present
    } else {
        Presence::Absent
    }
}

/// Convert katakana letters to hiragana.
///
/// Letters without a hiragana counterpart (ヷ..ヺ) and non-katakana
/// characters (ー, kanji, ASCII) pass through unchanged, so the conversion
/// is idempotent.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if ('\u{30A1}'..='\u{30F6}').contains(&c) || matches!(c, 'ヽ' | 'ヾ') {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Convert a hiragana string to katakana.
/// Non-hiragana characters (ー, ASCII, etc.) are passed through unchanged.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if is_hiragana(c) || matches!(c, 'ゝ' | 'ゞ') {
                char::from_u32(c as u32 + 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_classification() {
        assert!(is_hiragana('あ'));
        assert!(is_hiragana('ぁ'));
        assert!(!is_hiragana('ア'));
        assert!(is_katakana('ア'));
        assert!(is_katakana('ン'));
        assert!(!is_katakana('ー'));
        assert!(!is_katakana('あ'));
        assert!(is_kanji('漢'));
        assert!(is_kanji('々'));
        assert!(!is_kanji('あ'));
        assert!(is_kana('ー'));
        assert!(!is_entry_char('a'));
        assert!(!is_entry_char(','));
    }

    #[test]
    fn test_is_kana_only() {
        assert!(is_kana_only("しがない"));
        assert!(is_kana_only("ズキズキ"));
        assert!(is_kana_only("ちゃくしんメロディー"));
        assert!(is_kana_only("らーめん"));
        assert!(!is_kana_only("開始"));
        assert!(!is_kana_only("締め上げる"));
        assert!(!is_kana_only("deka"));
        assert!(!is_kana_only(""));
    }

    #[test]
    fn classify_hiragana() {
        for word in ["締め上げる", "しがない", "ちゃくしんメロディー"] {
            assert_eq!(classify(Some(word), ScriptKind::Hiragana), Presence::Present);
        }
        for word in ["ズキズキ", "デカ", "deka"] {
            assert_eq!(classify(Some(word), ScriptKind::Hiragana), Presence::Absent);
        }
    }

    #[test]
    fn classify_katakana() {
        for word in ["着信メロディ", "メロディ", "ちゃくしんメロディー"] {
            assert_eq!(classify(Some(word), ScriptKind::Katakana), Presence::Present);
        }
        for word in ["ずきずき", "でか", "deka", "ー"] {
            assert_eq!(classify(Some(word), ScriptKind::Katakana), Presence::Absent);
        }
    }

    #[test]
    fn classify_missing_text() {
        assert_eq!(classify(None, ScriptKind::Hiragana), Presence::NotApplicable);
        assert_eq!(classify(None, ScriptKind::Katakana), Presence::NotApplicable);
        assert!(!Presence::NotApplicable.is_present());
        assert_eq!(classify(Some(""), ScriptKind::Katakana), Presence::Absent);
    }

    #[test]
    fn test_katakana_to_hiragana() {
        assert_eq!(katakana_to_hiragana("メロディ"), "めろでぃ");
        assert_eq!(katakana_to_hiragana("ちゃくしんメロディー"), "ちゃくしんめろでぃー");
        assert_eq!(katakana_to_hiragana("ヴァ"), "ゔぁ");
        assert_eq!(katakana_to_hiragana("ヵヶ"), "ゕゖ");
        assert_eq!(katakana_to_hiragana("ヷ"), "ヷ");
        assert_eq!(katakana_to_hiragana("着信"), "着信");
        assert_eq!(katakana_to_hiragana(""), "");
    }

    #[test]
    fn test_hiragana_to_katakana() {
        assert_eq!(hiragana_to_katakana("きょうは"), "キョウハ");
        assert_eq!(hiragana_to_katakana("らーめん"), "ラーメン");
        assert_eq!(hiragana_to_katakana(""), "");
        assert_eq!(hiragana_to_katakana("abc"), "abc");
        assert_eq!(hiragana_to_katakana("カタカナ"), "カタカナ");
    }
}
