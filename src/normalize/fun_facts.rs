use serde_json::Value;

use super::title::extract_title_value;
use crate::payload::{display_string, is_present};

pub const UNTITLED_FACT: &str = "(untitled fact)";

/// Raw fact entries from whatever the fun-fact endpoint returned.
///
/// Servers have been seen returning `{"facts": [...]}`, a bare array,
/// `{"facts": "..."}`, and all of those again as a JSON-encoded string.
pub fn collect_fact_entries(payload: &Value) -> Vec<Value> {
    if let Some(Value::Array(facts)) = payload.get("facts") {
        return facts.clone();
    }
    if let Value::Array(items) = payload {
        return items.clone();
    }
    if let Some(Value::String(fact)) = payload.get("facts") {
        return vec![Value::String(fact.clone())];
    }
    if let Value::String(text) = payload {
        let Ok(mut parsed) = serde_json::from_str::<Value>(text) else {
            return vec![Value::String(text.clone())];
        };
        if let Some(Value::Array(facts)) = parsed.get_mut("facts") {
            return std::mem::take(facts);
        }
        return match parsed {
            Value::Array(items) => items,
            other if is_present(&other) => vec![other],
            _ => vec![Value::String(text.clone())],
        };
    }
    vec![Value::String(display_string(payload))]
}

/// Ordered fact titles; entries with no extractable title get a placeholder.
pub fn normalize_fun_facts(payload: &Value) -> Vec<String> {
    collect_fact_entries(payload)
        .iter()
        .map(|entry| {
            let title = extract_title_value(entry);
            if title.is_empty() {
                UNTITLED_FACT.to_string()
            } else {
                title
            }
        })
        .collect()
}
