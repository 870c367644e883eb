//! Plain-text result layout.
//!
//! An invocation prints its parameters on one line, then one indented
//! line per result row with the row's fields separated by `", "`, then a
//! blank line. Fields holding dates are shown as UTC date-times.
//!
//! Parameters and row fields keep the declaration order of the operation
//! and result structs (serde_json's `preserve_order`), which is the order
//! the query drivers print them in.

use serde_json::{Map, Value};
use snb_core::time::{format_date, format_datetime};
use snb_queries::{Operation, OperationResult};

const NO_MATCHES: &str = "  no matches";

fn is_date_field(key: &str) -> bool {
    key.ends_with("Date") || key == "birthday"
}

fn field(key: &str, value: &Value) -> String {
    match value {
        Value::Number(n) if key == "birthday" => n.as_i64().map_or(n.to_string(), format_date),
        Value::Number(n) if is_date_field(key) => {
            n.as_i64().map_or(n.to_string(), format_datetime)
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| field(key, item))
            .collect::<Vec<_>>()
            .join("; "),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| field(k, v))
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}

fn row(map: &Map<String, Value>) -> String {
    let fields: Vec<String> = map.iter().map(|(k, v)| field(k, v)).collect();
    format!("  {}", fields.join(", "))
}

/// The parameter line of an invocation.
pub fn header(op: &Operation) -> String {
    let value = serde_json::to_value(op).unwrap_or(Value::Null);
    let Value::Object(map) = value else {
        return op.name().to_string();
    };
    map.iter()
        .filter(|(k, _)| k.as_str() != "operation" && k.as_str() != "limit")
        .map(|(k, v)| field(k, v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Result lines of an invocation, without the trailing blank line.
pub fn body(result: &OperationResult) -> Vec<String> {
    match &result.value {
        Value::Null => vec![NO_MATCHES.to_string()],
        Value::Array(rows) if rows.is_empty() => vec![NO_MATCHES.to_string()],
        Value::Array(rows) => rows
            .iter()
            .map(|r| match r {
                Value::Object(map) => row(map),
                other => format!("  {}", field("", other)),
            })
            .collect(),
        Value::Object(map) => vec![row(map)],
        other => vec![format!("  {}", field("", other))],
    }
}

pub fn print(op: &Operation, result: &OperationResult) {
    println!("{}", header(op));
    for line in body(result) {
        println!("{}", line);
    }
    println!();
}
