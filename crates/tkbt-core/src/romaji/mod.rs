//! Kana-to-Latin transliteration.
//!
//! Uses a character trie built from a TOML table to transliterate hiragana
//! mora by mora, handling sokuon (っ) and yōon (きゃ) by longest match.

mod config;
mod romanize;
mod table;
mod trie;

pub use config::{parse_romaji_toml, RomajiConfigError};
pub use romanize::{romanize, romanize_with};
pub use trie::KanaTrie;

use crate::unicode::katakana_to_hiragana;

/// Returns the embedded default romaji TOML content.
pub fn default_toml() -> &'static str {
    table::DEFAULT_TOML
}

/// Normalize kana to hiragana, then romanize.
pub fn romanize_kana(kana: &str) -> String {
    romanize(&katakana_to_hiragana(kana))
}
