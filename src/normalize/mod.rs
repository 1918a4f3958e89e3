//! Payload normalizers
//!
//! Pure functions that turn a payload of unknown shape into something a
//! renderer can show. None of them fail; unknown shapes degrade to a string
//! rendering of whatever arrived.

pub mod dad_joke;
pub mod fun_facts;
pub mod motivation;
pub mod title;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::payload::is_present;

pub use dad_joke::normalize_dad_joke;
pub use fun_facts::{collect_fact_entries, normalize_fun_facts};
pub use motivation::normalize_motivation;
pub use title::{extract_title, extract_title_value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl NormalizedItem {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
        }
    }
}

/// Candidate field names, tried in order.
pub type FieldCandidates = &'static [&'static str];

pub const MOTIVATION_TEXT_FIELDS: FieldCandidates =
    &["quote", "motivation", "text", "message", "content"];
pub const JOKE_ITEM_TITLE_FIELDS: FieldCandidates = &["title", "joke", "setup", "id"];
pub const JOKE_OBJECT_TITLE_FIELDS: FieldCandidates = &["title", "setup", "joke", "message"];
pub const JOKE_BODY_FIELDS: FieldCandidates = &["punchline", "body", "content", "answer"];

/// First candidate key whose value is present (not null, false, 0 or "").
pub fn first_present<'a>(map: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|value| is_present(value))
}

/// Same lookup for a value that may not be an object at all.
pub fn first_present_in<'a>(value: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    value.as_object().and_then(|map| first_present(map, candidates))
}
