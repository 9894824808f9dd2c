//! Global settings loaded from TOML, following the same OnceLock pattern as the romaji table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub output: OutputSettings,
    pub table: TableSettings,
    pub pos: PosSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub no_value: String,
    pub translation_separator: String,
}

impl OutputSettings {
    /// Render a derived value, substituting the sentinel for "no value".
    pub fn render(&self, value: Option<&str>) -> String {
        value.unwrap_or(self.no_value.as_str()).to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    pub word_column: String,
    pub translation_column: String,
    pub keep_columns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PosSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_non_empty!(output.no_value);
    check_non_empty!(output.translation_separator);

    check_non_empty!(table.word_column);
    check_non_empty!(table.translation_column);
    check_non_empty!(table.keep_columns);
    if let Some(i) = s.table.keep_columns.iter().position(|c| c.is_empty()) {
        return Err(SettingsError::InvalidValue {
            field: format!("table.keep_columns[{i}]"),
            reason: "column name must not be empty".to_string(),
        });
    }

    if !(s.pos.endpoint.starts_with("https://") || s.pos.endpoint.starts_with("http://")) {
        return Err(SettingsError::InvalidValue {
            field: "pos.endpoint".to_string(),
            reason: "must be an http(s) URL".to_string(),
        });
    }
    if s.pos.timeout_secs == 0 {
        return Err(SettingsError::InvalidValue {
            field: "pos.timeout_secs".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    Ok(())
}
