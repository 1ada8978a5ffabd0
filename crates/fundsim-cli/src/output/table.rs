use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::flatten;

/// Render the result section as a Field/Value table, then any warnings and
/// the methodology line from the envelope.
pub fn print_table(value: &Value) {
    let envelope = value.as_object();
    let result = envelope
        .and_then(|map| map.get("result"))
        .unwrap_or(value);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (path, rendered) in flatten(result) {
        builder.push_record([path.as_str(), rendered.as_str()]);
    }
    println!("{}", Table::from(builder));

    if let Some(map) = envelope {
        if let Some(Value::Array(warnings)) = map.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for warning in warnings {
                    if let Value::String(s) = warning {
                        println!("  - {}", s);
                    }
                }
            }
        }
        if let Some(Value::String(methodology)) = map.get("methodology") {
            println!("\nMethodology: {}", methodology);
        }
    }
}
