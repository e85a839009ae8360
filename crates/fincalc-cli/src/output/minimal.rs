use serde_json::Value;

/// Keys that hold the headline figure of each command, in priority order.
const PRIORITY_KEYS: [&str; 5] = [
    "monthly_installment",
    "total_value",
    "value",
    "formatted",
    "final_output",
];

/// Print just the key answer value from the output.
///
/// Looks for a well-known result field first, then falls back to the first
/// field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    println!("{}", headline(result_obj));
}

fn headline(result_obj: &Value) -> String {
    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
