use serde_json::Value;

use super::{MOTIVATION_TEXT_FIELDS, NormalizedItem, first_present};
use crate::payload::pretty;

pub const EMPTY_MOTIVATION: &str = "(empty response)";

/// Quote-like field of an object, else the whole payload, pretty-printed.
pub fn normalize_motivation(payload: &Value) -> NormalizedItem {
    let display = match payload {
        Value::Object(map) => first_present(map, MOTIVATION_TEXT_FIELDS).unwrap_or(payload),
        other => other,
    };

    let text = pretty(display);
    if text.is_empty() {
        NormalizedItem::titled(EMPTY_MOTIVATION)
    } else {
        NormalizedItem::titled(text)
    }
}
