use clap::{Parser, Subcommand};

use tkbt_cli::commands::table_ops::TableArgs;
use tkbt_cli::commands::{config_ops, extract_ops, pos_ops, table_ops};
use tkbt_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(
    name = "tkbt",
    about = "Decompose Japanese dictionary-export entries into word, reading and romanization"
)]
struct Cli {
    /// Custom settings TOML (see `tkbt config settings-export`)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Custom kana-to-Latin table TOML (see `tkbt config romaji-export`)
    #[arg(long, global = true)]
    romaji: Option<String>,
    /// Write logs to stderr as JSON lines
    #[arg(long, global = true)]
    json_log: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decompose a single raw entry
    Extract {
        /// Raw entry, e.g. "締め上げる, しめあげる, 絞め上げる"
        entry: String,
        /// Field to print: word, pr, roma or alt (repeatable; default all)
        #[arg(short, long = "field")]
        fields: Vec<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Add derived columns to a CSV dictionary export
    Table {
        /// Input CSV file
        input_file: String,
        /// Output CSV file (default: <timestamp>.csv)
        output_file: Option<String>,
        /// Columns to generate: word, pr, roma, alt, pos or all (default all)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
        /// Input column holding the raw entries
        #[arg(long)]
        word_column: Option<String>,
        /// Input columns to carry over
        #[arg(long, value_delimiter = ',')]
        keep: Vec<String>,
        /// Skip the parts-of-speech lookup
        #[arg(long)]
        offline: bool,
    },
    /// Look up the parts of speech of a word
    Pos {
        /// Word to look up
        word: String,
    },
    /// Inspect or validate configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default romaji table
    RomajiExport,
    /// Validate a romaji table file
    RomajiValidate { file: String },
    /// Print the default settings
    SettingsExport,
    /// Validate a settings file
    SettingsValidate { file: String },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_log);

    if let Some(file) = &cli.settings {
        config_ops::load_settings(file);
    }
    if let Some(file) = &cli.romaji {
        config_ops::load_romaji(file);
    }

    match cli.command {
        Command::Extract {
            entry,
            fields,
            json,
        } => extract_ops::extract_cmd(&entry, &fields, json),
        Command::Table {
            input_file,
            output_file,
            columns,
            word_column,
            keep,
            offline,
        } => table_ops::table_cmd(TableArgs {
            input_file: &input_file,
            output_file: output_file.as_deref(),
            columns: &columns,
            word_column: word_column.as_deref(),
            keep: &keep,
            offline,
        }),
        Command::Pos { word } => pos_ops::pos_cmd(&word),
        Command::Config { action } => match action {
            ConfigAction::RomajiExport => config_ops::romaji_export(),
            ConfigAction::RomajiValidate { file } => config_ops::romaji_validate(&file),
            ConfigAction::SettingsExport => config_ops::settings_export(),
            ConfigAction::SettingsValidate { file } => config_ops::settings_validate(&file),
        },
    }
}
