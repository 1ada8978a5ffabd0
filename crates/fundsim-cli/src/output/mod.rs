pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten a JSON tree into dotted-path rows, one per leaf.
///
/// Simulation outputs nest (valuation_before.per_share_final and friends);
/// the tabular formatters all want flat Field/Value pairs.
pub fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into(String::new(), value, &mut rows);
    rows
}

fn flatten_into(prefix: String, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(path, val, rows);
            }
        }
        Value::Array(arr) => {
            for (index, val) in arr.iter().enumerate() {
                flatten_into(format!("{prefix}[{index}]"), val, rows);
            }
        }
        Value::String(s) => rows.push((prefix, s.clone())),
        Value::Number(n) => rows.push((prefix, n.to_string())),
        Value::Bool(b) => rows.push((prefix, b.to_string())),
        Value::Null => rows.push((prefix, String::new())),
    }
}
