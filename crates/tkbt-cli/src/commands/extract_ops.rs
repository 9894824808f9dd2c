use serde_json::{Map, Value};

use tkbt_core::field::{Decomposition, Field};
use tkbt_core::settings::settings;

/// Print derived fields of one raw entry.
///
/// An unknown field selector is a usage error and exits the process.
pub fn extract_cmd(entry: &str, selectors: &[String], json: bool) {
    let fields: Vec<Field> = if selectors.is_empty() {
        Field::ALL.to_vec()
    } else {
        selectors
            .iter()
            .map(|s| die!(s.parse::<Field>(), "Error: {}"))
            .collect()
    };
    let decomposition = die!(Decomposition::from_raw(entry), "Error: {}");

    if json {
        let map: Map<String, Value> = fields
            .iter()
            .map(|&f| {
                let value = decomposition
                    .get(f)
                    .map_or(Value::Null, |v| Value::String(v.to_string()));
                (f.selector().to_string(), value)
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&map).expect("JSON serialization failed")
        );
        return;
    }

    let output = &settings().output;
    if let [field] = fields.as_slice() {
        println!("{}", output.render(decomposition.get(*field)));
        return;
    }
    for field in fields {
        println!(
            "{:<17}{}",
            format!("{}:", field.column_name()),
            output.render(decomposition.get(field))
        );
    }
}
