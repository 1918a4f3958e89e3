use serde_json::Value;

use super::{
    JOKE_BODY_FIELDS, JOKE_ITEM_TITLE_FIELDS, JOKE_OBJECT_TITLE_FIELDS, NormalizedItem,
    first_present_in,
};
use crate::payload::{display_string, is_present, pretty};

pub const UNTITLED_JOKE: &str = "(untitled joke)";

/// Title and punchline from a joke payload.
///
/// `None` means the endpoint answered with nothing usable (null, `""`,
/// `false` or `0`) and the caller should say so instead of rendering.
pub fn normalize_dad_joke(payload: &Value) -> Option<NormalizedItem> {
    if !is_present(payload) {
        return None;
    }

    let (title, body) = match payload {
        Value::String(s) => (Some(s.clone()), None),
        Value::Array(items) if !items.is_empty() => {
            let item = &items[0];
            let title = first_present_in(item, JOKE_ITEM_TITLE_FIELDS)
                .map(display_string)
                .unwrap_or_else(|| pretty(item));
            (Some(title), body_of(item))
        }
        Value::Array(_) | Value::Object(_) => {
            let title = first_present_in(payload, JOKE_OBJECT_TITLE_FIELDS)
                .map(display_string)
                .or_else(|| {
                    payload
                        .get("data")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                });
            (title, body_of(payload))
        }
        other => (Some(display_string(other)), None),
    };

    Some(NormalizedItem {
        title: title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED_JOKE.to_string()),
        body,
    })
}

fn body_of(value: &Value) -> Option<String> {
    first_present_in(value, JOKE_BODY_FIELDS).map(display_string)
}
