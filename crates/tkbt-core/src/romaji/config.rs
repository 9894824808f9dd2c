use std::collections::BTreeMap;

use serde::Deserialize;

use crate::unicode::is_kana_only;

#[derive(Deserialize)]
struct RomajiConfig {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomajiConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("key is not kana: {0:?}")]
    NonKanaKey(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("non-ASCII value for key {key}: {value:?}")]
    NonAsciiValue { key: String, value: String },
    #[error("romaji table already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a sorted `BTreeMap<kana, latin>`.
pub fn parse_romaji_toml(toml_str: &str) -> Result<BTreeMap<String, String>, RomajiConfigError> {
    let config: RomajiConfig =
        toml::from_str(toml_str).map_err(|e| RomajiConfigError::Parse(e.to_string()))?;

    if config.mappings.is_empty() {
        return Err(RomajiConfigError::Empty);
    }

    for (key, value) in &config.mappings {
        if !is_kana_only(key) {
            return Err(RomajiConfigError::NonKanaKey(key.clone()));
        }
        if value.is_empty() {
            return Err(RomajiConfigError::EmptyValue(key.clone()));
        }
        if !value.is_ascii() {
            return Err(RomajiConfigError::NonAsciiValue {
                key: key.clone(),
                value: value.clone(),
            });
        }
    }

    Ok(config.mappings)
}
