use serde_json::{Map, Value};
use std::io::{self, Write};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(value, stdout.lock()) {
        eprintln!("CSV output error: {}", e);
    }
}

/// Envelope results become `field,value` rows (chart slices as
/// `breakdown.<label>`); `results` arrays become one row per element.
fn write_csv<W: Write>(value: &Value, out: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);

    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                write_field_rows(&mut wtr, result)?;
            } else if let Some(Value::Array(results)) = map.get("results") {
                write_array_csv(&mut wtr, results)?;
            } else {
                write_field_rows(&mut wtr, map)?;
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr)?,
        _ => wtr.write_record([&format_csv_value(value)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_field_rows<W: Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) -> Result<(), csv::Error> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        match (key.as_str(), val) {
            ("breakdown", Value::Array(slices)) => {
                for slice in slices {
                    let label = slice.get("label").and_then(Value::as_str).unwrap_or("?");
                    let amount = slice.get("value").map(format_csv_value).unwrap_or_default();
                    wtr.write_record([format!("breakdown.{label}"), amount])?;
                }
            }
            _ => wtr.write_record([key.as_str(), &format_csv_value(val)])?,
        }
    }
    Ok(())
}

fn write_array_csv<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> Result<(), csv::Error> {
    if arr.is_empty() {
        return Ok(());
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        wtr.write_record(&headers)?;

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                wtr.write_record(&row)?;
            }
        }
    } else {
        for item in arr {
            wtr.write_record([&format_csv_value(item)])?;
        }
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(value, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_envelope_result_with_breakdown() {
        let v = json!({
            "result": {
                "monthly_installment": 1321.51,
                "breakdown": [
                    {"id": 0, "label": "Loan Interest", "value": 158581.2, "share": 0.61},
                    {"id": 1, "label": "Principal Loan Amount", "value": 100000.0, "share": 0.39}
                ]
            }
        });
        let out = render(&v);
        assert!(out.starts_with("field,value\n"));
        assert!(out.contains("breakdown.Loan Interest,158581.2\n"));
        assert!(out.contains("monthly_installment,1321.51\n"));
    }

    #[test]
    fn test_results_array_rows() {
        let v = json!({"results": [{"step": 1, "applied": true}, {"step": 2, "applied": false}]});
        assert_eq!(render(&v), "applied,step\ntrue,1\nfalse,2\n");
    }
}
