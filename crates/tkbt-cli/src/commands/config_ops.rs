use std::fs;

use tkbt_core::romaji::{self, KanaTrie};
use tkbt_core::settings;

/// Install a custom settings file before anything reads the settings.
pub fn load_settings(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(settings::init_custom(content), "Error in {file}: {}");
}

/// Install a custom romaji table before the first romanization.
pub fn load_romaji(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(KanaTrie::init_custom(content), "Error in {file}: {}");
}

pub fn romaji_export() {
    print!("{}", romaji::default_toml());
}

pub fn romaji_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(romaji::parse_romaji_toml(&content), "Error: {}");
    println!("OK: {} mappings", map.len());
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: output.no_value={:?}, table.word_column={:?}, pos.endpoint={}",
        s.output.no_value, s.table.word_column, s.pos.endpoint
    );
}
