//! CSV enrichment: adds derived columns to a dictionary export.

use std::collections::HashMap;
use std::io;

use rayon::prelude::*;
use tracing::{info, warn};

use tkbt_core::field::{Decomposition, Field};
use tkbt_core::settings::Settings;
use tkbt_core::EntryError;

use crate::pos::{CachedLookup, PosLookup};

pub const LIST_COLUMN: &str = "List";
pub const POS_COLUMN: &str = "Parts of Speech";

/// Separator between alternative meanings in the export's translation column.
const TRANSLATION_ALTERNATIVES: &str = ", , ";

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("missing column {0:?} in input")]
    MissingColumn(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column {0:?} (expected word, pr, roma, alt, pos or all)")]
pub struct UnknownColumn(pub String);

/// Which derived columns to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    pub fields: Vec<Field>,
    pub pos: bool,
}

impl ColumnSelection {
    pub fn all() -> Self {
        Self {
            fields: Field::ALL.to_vec(),
            pos: true,
        }
    }

    /// Parse selector tokens (`word`, `pr`, `roma`, `alt`, `pos`, `all`).
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, UnknownColumn> {
        let mut selection = Self {
            fields: Vec::new(),
            pos: false,
        };
        for token in tokens {
            let token = token.as_ref().trim();
            match token {
                "all" => return Ok(Self::all()),
                "pos" => selection.pos = true,
                _ => {
                    let field: Field = token
                        .parse()
                        .map_err(|_| UnknownColumn(token.to_string()))?;
                    if !selection.fields.contains(&field) {
                        selection.fields.push(field);
                    }
                }
            }
        }
        Ok(selection)
    }
}

#[derive(Debug, Clone)]
pub struct TableOptions {
    pub selection: ColumnSelection,
    pub word_column: String,
    pub translation_column: String,
    pub keep_columns: Vec<String>,
    pub no_value: String,
    pub translation_separator: String,
}

impl TableOptions {
    pub fn from_settings(settings: &Settings, selection: ColumnSelection) -> Self {
        Self {
            selection,
            word_column: settings.table.word_column.clone(),
            translation_column: settings.table.translation_column.clone(),
            keep_columns: settings.table.keep_columns.clone(),
            no_value: settings.output.no_value.clone(),
            translation_separator: settings.output.translation_separator.clone(),
        }
    }

    fn derives_word(&self) -> bool {
        self.selection.fields.contains(&Field::Word)
    }

    /// Output column order; columns that were not produced are skipped.
    fn column_order(&self) -> Vec<&str> {
        let word = if self.derives_word() {
            Field::Word.column_name()
        } else {
            self.word_column.as_str()
        };
        vec![
            LIST_COLUMN,
            word,
            Field::Pronunciation.column_name(),
            Field::Romanization.column_name(),
            Field::AlternateForms.column_name(),
            POS_COLUMN,
            self.translation_column.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableReport {
    pub rows: usize,
    pub malformed: usize,
    pub pos_failures: usize,
}

/// Read a CSV export from `input`, add the selected columns and write the
/// result to `output`.
///
/// Rows whose entry cannot be decomposed are kept: their raw text stays in
/// the word column and every other derived cell gets the "no value"
/// sentinel. `lookup` of `None` leaves the parts-of-speech column empty.
pub fn enrich<R: io::Read, W: io::Write>(
    input: R,
    output: W,
    options: &TableOptions,
    lookup: Option<&dyn PosLookup>,
) -> Result<TableReport, TableError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    let index_of = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    };

    let word_idx = index_of(options.word_column.as_str())?;
    let kept = options
        .keep_columns
        .iter()
        .map(|name| Ok((name.as_str(), index_of(name.as_str())?)))
        .collect::<Result<Vec<_>, TableError>>()?;
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;

    let decomposed: Vec<Result<Decomposition, EntryError>> = records
        .par_iter()
        .map(|record| Decomposition::from_raw(record.get(word_idx).unwrap_or_default()))
        .collect();

    let mut report = TableReport {
        rows: records.len(),
        ..TableReport::default()
    };
    for (row, result) in decomposed.iter().enumerate() {
        if let Err(e) = result {
            warn!(row = row + 1, error = %e, "skipping derivation");
            report.malformed += 1;
        }
    }

    let mut columns: HashMap<&str, Vec<String>> = HashMap::new();

    for &(name, idx) in &kept {
        if options.derives_word() && name == options.word_column {
            continue;
        }
        let values = records
            .iter()
            .map(|record| {
                let cell = record.get(idx).unwrap_or_default();
                if name == options.translation_column {
                    cell.replace(TRANSLATION_ALTERNATIVES, &options.translation_separator)
                } else {
                    cell.to_string()
                }
            })
            .collect();
        columns.insert(name, values);
    }

    for &field in &options.selection.fields {
        let values = decomposed
            .iter()
            .zip(&records)
            .map(|(result, record)| match result {
                Ok(d) => d.get(field).unwrap_or(options.no_value.as_str()).to_string(),
                Err(_) if field == Field::Word => {
                    record.get(word_idx).unwrap_or_default().to_string()
                }
                Err(_) => options.no_value.clone(),
            })
            .collect();
        columns.insert(field.column_name(), values);
    }

    if options.selection.pos {
        let cached = lookup.map(CachedLookup::new);
        let values = decomposed
            .iter()
            .map(|result| {
                let (Some(lookup), Ok(d)) = (&cached, result) else {
                    return options.no_value.clone();
                };
                match lookup.parts_of_speech(&d.word) {
                    Ok(pos) => pos,
                    Err(e) => {
                        warn!(word = %d.word, error = %e, "part-of-speech lookup failed");
                        report.pos_failures += 1;
                        options.no_value.clone()
                    }
                }
            })
            .collect();
        columns.insert(POS_COLUMN, values);
    }

    let order: Vec<&str> = options
        .column_order()
        .into_iter()
        .filter(|name| columns.contains_key(name))
        .collect();

    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(&order)?;
    for row in 0..records.len() {
        writer.write_record(order.iter().map(|name| columns[name][row].as_str()))?;
    }
    writer.flush()?;

    info!(
        rows = report.rows,
        malformed = report.malformed,
        pos_failures = report.pos_failures,
        "table enriched"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tkbt_core::settings::parse_settings_toml;
    use tkbt_core::settings::DEFAULT_SETTINGS_TOML;

    use super::*;
    use crate::pos::PosError;

    const EXPORT: &str = "\
List,Word,Translation,Notes
JLPT,開始,\"start, , beginning\",a
JLPT,\"締め上げる, しめあげる, 絞め上げる\",to tighten,b
JLPT,\"でか, デカ\",huge,c
JLPT,deka,broken,d
";

    struct StubLookup(HashMap<&'static str, &'static str>);

    impl PosLookup for StubLookup {
        fn parts_of_speech(&self, word: &str) -> Result<String, PosError> {
            self.0
                .get(word)
                .map(|s| s.to_string())
                .ok_or_else(|| PosError::NotFound(word.to_string()))
        }
    }

    fn options(selection: ColumnSelection) -> TableOptions {
        let settings = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        TableOptions::from_settings(&settings, selection)
    }

    fn run(options: &TableOptions, lookup: Option<&dyn PosLookup>) -> (Vec<String>, TableReport) {
        let mut out = Vec::new();
        let report = enrich(EXPORT.as_bytes(), &mut out, options, lookup).unwrap();
        let text = String::from_utf8(out).unwrap();
        (text.lines().map(str::to_string).collect(), report)
    }

    #[test]
    fn all_columns_offline() {
        let (lines, report) = run(&options(ColumnSelection::all()), None);
        assert_eq!(
            lines,
            vec![
                "Word,Pronunciation,Romanisation,Alternate Forms,Parts of Speech,Translation",
                "開始,-,-,-,-,start OR beginning",
                "締め上げる,しめあげる,shimeageru,絞め上げる,-,to tighten",
                "でか,-,deka,デカ,-,huge",
                "deka,-,-,-,-,broken",
            ]
        );
        assert_eq!(
            report,
            TableReport {
                rows: 4,
                malformed: 1,
                pos_failures: 0
            }
        );
    }

    #[test]
    fn selected_columns_keep_raw_word() {
        let selection = ColumnSelection::parse(&["roma"]).unwrap();
        let (lines, _) = run(&options(selection), None);
        assert_eq!(lines[0], "Word,Romanisation,Translation");
        assert_eq!(
            lines[2],
            "\"締め上げる, しめあげる, 絞め上げる\",shimeageru,to tighten"
        );
    }

    #[test]
    fn pos_lookup_uses_primary_form() {
        let lookup = StubLookup(HashMap::from([
            ("開始", "noun, suru verb"),
            ("締め上げる", "ichidan verb"),
        ]));
        let selection = ColumnSelection::parse(&["word", "pos"]).unwrap();
        let (lines, report) = run(&options(selection), Some(&lookup));
        assert_eq!(lines[0], "Word,Parts of Speech,Translation");
        assert_eq!(lines[1], "開始,\"noun, suru verb\",start OR beginning");
        assert_eq!(lines[2], "締め上げる,ichidan verb,to tighten");
        assert_eq!(lines[3], "でか,-,huge");
        assert_eq!(report.pos_failures, 1);
        assert_eq!(report.malformed, 1);
    }

    #[test]
    fn keep_list_column() {
        let mut opts = options(ColumnSelection::parse(&["word"]).unwrap());
        opts.keep_columns = vec!["List".into(), "Word".into(), "Notes".into()];
        let (lines, _) = run(&opts, None);
        // Columns outside the output order are dropped.
        assert_eq!(lines[0], "List,Word");
        assert_eq!(lines[1], "JLPT,開始");
    }

    #[test]
    fn missing_column_is_an_error() {
        let mut opts = options(ColumnSelection::all());
        opts.word_column = "Term".into();
        let err = enrich(EXPORT.as_bytes(), Vec::new(), &opts, None).unwrap_err();
        assert!(matches!(err, TableError::MissingColumn(ref c) if c == "Term"));
    }

    #[test]
    fn parse_selection() {
        assert_eq!(
            ColumnSelection::parse(&["pr", "alt", "pr"]).unwrap(),
            ColumnSelection {
                fields: vec![Field::Pronunciation, Field::AlternateForms],
                pos: false
            }
        );
        assert_eq!(
            ColumnSelection::parse(&["word", "all"]).unwrap(),
            ColumnSelection::all()
        );
        assert_eq!(
            ColumnSelection::parse(&["word", "rom"]),
            Err(UnknownColumn("rom".to_string()))
        );
    }
}
