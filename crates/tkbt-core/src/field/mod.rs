//! Per-field derivation from a decomposed entry.
//!
//! Every field is computed on demand from [`EntryParts`]; `None` means the
//! field has no value for this entry. Rendering "no value" (e.g. as `-`) is
//! left to the presentation layer.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug_span;

use crate::entry::{extract_parts, EntryError, EntryParts, ALTERNATE_SEPARATOR};
use crate::romaji::romanize_kana;
use crate::unicode::{classify, is_kana_only, katakana_to_hiragana, ScriptKind};


/// A derivable output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Word,
    Pronunciation,
    Romanization,
    AlternateForms,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field selector {0:?} (expected one of: word, pr, roma, alt)")]
pub struct UnknownField(pub String);

impl Field {
    /// All fields, in output column order.
    pub const ALL: [Field; 4] = [
        Field::Word,
        Field::Pronunciation,
        Field::Romanization,
        Field::AlternateForms,
    ];

    /// Selector token accepted by [`Field::from_str`].
    pub fn selector(self) -> &'static str {
        match self {
            Field::Word => "word",
            Field::Pronunciation => "pr",
            Field::Romanization => "roma",
            Field::AlternateForms => "alt",
        }
    }

    /// Header of the output column this field fills.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Word => "Word",
            Field::Pronunciation => "Pronunciation",
            Field::Romanization => "Romanisation",
            Field::AlternateForms => "Alternate Forms",
        }
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "word" => Ok(Field::Word),
            "pr" => Ok(Field::Pronunciation),
            "roma" => Ok(Field::Romanization),
            "alt" => Ok(Field::AlternateForms),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Derive one field from already-extracted parts.
pub fn derive(parts: &EntryParts<'_>, field: Field) -> Option<String> {
    match field {
        Field::Word => Some(parts.primary.to_string()),
        Field::Pronunciation => pronunciation(parts),
        Field::Romanization => romanization(parts),
        Field::AlternateForms => alternate_forms(parts),
    }
}

/// Extract and derive in one step.
pub fn decompose(raw: &str, field: Field) -> Result<Option<String>, EntryError> {
    let _span = debug_span!("decompose", %field).entered();
    let parts = extract_parts(raw)?;
    Ok(derive(&parts, field))
}

/// Only hiragana readings count as a pronunciation; a katakana-only reading
/// is surfaced as an alternate form instead.
fn pronunciation(parts: &EntryParts<'_>) -> Option<String> {
    let reading = parts.reading?;
    if classify(Some(reading), ScriptKind::Hiragana).is_present() {
        Some(katakana_to_hiragana(reading))
    } else {
        None
    }
}

fn romanization(parts: &EntryParts<'_>) -> Option<String> {
    match parts.reading {
        Some(reading) => Some(romanize_kana(reading)),
        None if is_kana_only(parts.primary) => Some(romanize_kana(parts.primary)),
        None => None,
    }
}

fn alternate_forms(parts: &EntryParts<'_>) -> Option<String> {
    let has_katakana = classify(parts.reading, ScriptKind::Katakana).is_present()
        || classify(Some(parts.primary), ScriptKind::Katakana).is_present();

    match (&parts.alternates, parts.reading) {
        (Some(alternates), Some(reading)) if has_katakana => {
            Some(format!("{reading}{ALTERNATE_SEPARATOR}{alternates}"))
        }
        (Some(alternates), _) => Some(alternates.clone()),
        (None, Some(reading)) if has_katakana => Some(reading.to_string()),
        (None, _) => None,
    }
}

/// All derived fields of one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decomposition {
    pub word: String,
    pub pronunciation: Option<String>,
    pub romanization: Option<String>,
    pub alternate_forms: Option<String>,
}

impl Decomposition {
    pub fn from_raw(raw: &str) -> Result<Self, EntryError> {
        let parts = extract_parts(raw)?;
        Ok(Self::from_parts(&parts))
    }

    pub fn from_parts(parts: &EntryParts<'_>) -> Self {
        Self {
            word: parts.primary.to_string(),
            pronunciation: pronunciation(parts),
            romanization: romanization(parts),
            alternate_forms: alternate_forms(parts),
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Word => Some(&self.word),
            Field::Pronunciation => self.pronunciation.as_deref(),
            Field::Romanization => self.romanization.as_deref(),
            Field::AlternateForms => self.alternate_forms.as_deref(),
        }
    }
}
