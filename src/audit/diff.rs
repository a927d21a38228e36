//! Diff generation for audit logging
//!
//! Generates human-readable summaries of what changed between two snapshots of
//! a ledger entity. Money fields are stored as cents and shown as amounts.

use serde_json::Value;

use crate::models::Money;

const MONEY_FIELDS: &[&str] = &["total_budget", "allocated_amount", "amount"];

/// Generate a human-readable diff between two JSON values
///
/// Only top-level fields are compared; nested collections are summarised by
/// their length.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if before_val != after_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(key, before_val),
                        format_value(key, after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_value(key, before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!(
                        "{}: (added) -> {}",
                        key,
                        format_value(key, after_val)
                    ));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!(
            "{} -> {}",
            format_value("", before),
            format_value("", after)
        )),
        _ => None,
    }
}

fn format_value(key: &str, value: &Value) -> String {
    match value {
        Value::Number(n) if MONEY_FIELDS.contains(&key) => match n.as_i64() {
            Some(cents) => Money::from_cents(cents).to_string(),
            None => n.to_string(),
        },
        Value::Null => "none".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
