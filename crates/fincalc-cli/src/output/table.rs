use fincalc_core::{GroupingStyle, NumberFormat};
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as a table, grouping digits of numeric cells with `fmt`.
pub fn print_table(value: &Value, fmt: &NumberFormat<GroupingStyle>) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map, fmt);
            } else if let Some(Value::Array(rows)) = map.get("results") {
                print_array_table(rows, fmt);
                let rest: Map<String, Value> = map
                    .iter()
                    .filter(|(k, _)| k.as_str() != "results")
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                if !rest.is_empty() {
                    println!();
                    print_flat_object(&rest, fmt);
                }
            } else {
                print_flat_object(map, fmt);
            }
        }
        Value::Array(arr) => print_array_table(arr, fmt),
        _ => println!("{}", format_value(value, fmt)),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>, fmt: &NumberFormat<GroupingStyle>) {
    match result {
        Value::Object(res_map) => {
            let breakdown = res_map.get("breakdown");
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in res_map.iter().filter(|(k, _)| k.as_str() != "breakdown") {
                builder.push_record([key.as_str(), &format_value(val, fmt)]);
            }
            println!("{}", Table::from(builder));

            if let Some(Value::Array(slices)) = breakdown {
                println!("\nBreakdown:");
                print_array_table(slices, fmt);
            }
        }
        _ => print_flat_object(envelope, fmt),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(map: &Map<String, Value>, fmt: &NumberFormat<GroupingStyle>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val, fmt)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value], fmt: &NumberFormat<GroupingStyle>) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| format_value(v, fmt))
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item, fmt));
        }
    }
}

fn format_value(value: &Value, fmt: &NumberFormat<GroupingStyle>) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) => fmt.format_f64(f),
            None => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(|v| format_value(v, fmt)).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_are_grouped() {
        let fmt = NumberFormat::indian();
        assert_eq!(format_value(&json!(258581.2), &fmt), "2,58,581.2");
        assert_eq!(format_value(&json!(12), &fmt), "12");
    }

    #[test]
    fn test_non_finite_results_show_as_dash() {
        assert_eq!(format_value(&Value::Null, &NumberFormat::western()), "-");
    }
}
