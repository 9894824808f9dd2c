//! Decomposition of raw Japanese dictionary-export entries.
//!
//! A raw entry such as `"締め上げる, しめあげる, 絞め上げる"` is split into
//! its primary written form, kana reading and alternate forms, from which
//! the word, pronunciation, romanization and alternate-forms columns are
//! derived.

pub mod entry;
pub mod field;
pub mod romaji;
pub mod settings;
pub mod unicode;

pub use entry::{extract_parts, EntryError, EntryParts};
pub use field::{decompose, derive, Decomposition, Field, UnknownField};
