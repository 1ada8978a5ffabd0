use serde_json::Value;
use std::io;

use super::flatten;

/// Write the result section as two-column CSV to stdout.
pub fn print_csv(value: &Value) {
    let result = value
        .as_object()
        .and_then(|map| map.get("result"))
        .unwrap_or(value);

    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let _ = wtr.write_record(["field", "value"]);
    for (path, rendered) in flatten(result) {
        let _ = wtr.write_record([path.as_str(), rendered.as_str()]);
    }
    let _ = wtr.flush();
}
