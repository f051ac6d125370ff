use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field of the object.
pub fn print_minimal(value: &Value) {
    // Priority list of key output fields
    let priority_keys = [
        "payment",
        "monthly_payment",
        "approved",
        "pd",
        "total_cost",
        "ltv",
        "dti",
        "rate_pct",
        "monthly_cost",
        "residual_value",
    ];

    if let Value::Object(map) = value {
        // Try priority keys first (skip null values)
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    if let Value::Array(arr) = value {
        // One line per element: the cheapest summary of a ranked list.
        for item in arr {
            if let Value::Object(map) = item {
                for key in &priority_keys {
                    if let Some(val) = map.get(*key) {
                        println!("{}", format_minimal(val));
                        break;
                    }
                }
            } else {
                println!("{}", format_minimal(item));
            }
        }
        return;
    }

    println!("{}", format_minimal(value));
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
