use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use time::macros::format_description;
use time::OffsetDateTime;

use tkbt_core::settings::settings;

use crate::pos::{JishoClient, PosLookup};
use crate::table::{enrich, ColumnSelection, TableOptions};

pub struct TableArgs<'a> {
    pub input_file: &'a str,
    pub output_file: Option<&'a str>,
    pub columns: &'a [String],
    pub word_column: Option<&'a str>,
    pub keep: &'a [String],
    pub offline: bool,
}

pub fn table_cmd(args: TableArgs<'_>) {
    let selection = if args.columns.is_empty() {
        ColumnSelection::all()
    } else {
        die!(ColumnSelection::parse(args.columns), "Error: {}")
    };

    let s = settings();
    let mut options = TableOptions::from_settings(s, selection);
    if let Some(column) = args.word_column {
        options.word_column = column.to_string();
    }
    if !args.keep.is_empty() {
        options.keep_columns = args.keep.to_vec();
    }

    let input = die!(
        File::open(args.input_file),
        "Error opening {}: {}",
        args.input_file
    );
    let output_path = args
        .output_file
        .map(PathBuf::from)
        .unwrap_or_else(timestamped_output_path);
    let output = die!(
        File::create(&output_path),
        "Error creating {}: {}",
        output_path.display()
    );

    let client =
        (options.selection.pos && !args.offline).then(|| JishoClient::from_settings(&s.pos));
    let lookup = client.as_ref().map(|c| c as &dyn PosLookup);

    let report = die!(
        enrich(BufReader::new(input), BufWriter::new(output), &options, lookup),
        "Error: {}"
    );
    println!(
        "Wrote {} rows to {} ({} malformed, {} part-of-speech lookups failed)",
        report.rows,
        output_path.display(),
        report.malformed,
        report.pos_failures
    );
}

/// `<YYYY-mm-dd_HHMMSS>.csv` in the working directory.
fn timestamped_output_path() -> PathBuf {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let format = format_description!("[year]-[month]-[day]_[hour][minute][second]");
    let stamp = now
        .format(&format)
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    PathBuf::from(format!("{stamp}.csv"))
}
