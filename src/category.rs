//! Board sections, motivation categories, and request URL building

use std::fmt;

use reqwest::Url;
use serde::Serialize;

use crate::error::FetchError;

/// Output areas on the board; each has its own status, content, and copy button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Motivation,
    DadJoke,
    FunFacts,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Motivation => "motivation",
            Section::DadJoke => "dad_joke",
            Section::FunFacts => "fun_facts",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category keys understood by the motivation API, with the labels it expects.
pub const MOTIVATION_CATEGORIES: &[(&str, &str)] = &[
    ("work&career", "Work & Career"),
    ("health&fitness", "Health & Fitness"),
    ("lifeandgrowth", "Life and Growth"),
    ("success&achievement", "Success & Achievement"),
];

pub const DEFAULT_FUN_FACT_THEME: &str = "random";

/// Map a known category key to its API label; anything else passes through.
pub fn motivation_category_label(key: &str) -> &str {
    MOTIVATION_CATEGORIES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

/// `base` with one query parameter appended and percent-encoded.
///
/// Encoding is `application/x-www-form-urlencoded`, so a space becomes `+`
/// rather than `%20`; servers decode both to the same value.
/// An empty base stays empty so the fetcher reports it as such.
pub fn endpoint_url(base: &str, param: &str, value: &str) -> Result<String, FetchError> {
    if base.trim().is_empty() {
        return Ok(String::new());
    }
    Url::parse_with_params(base, &[(param, value)])
        .map(String::from)
        .map_err(|e| FetchError::InvalidUrl {
            url: base.to_string(),
            message: e.to_string(),
        })
}

pub fn motivation_url(base: &str, category: &str) -> Result<String, FetchError> {
    endpoint_url(base, "category", motivation_category_label(category))
}

pub fn fun_fact_url(base: &str, theme: &str) -> Result<String, FetchError> {
    let theme = if theme.is_empty() {
        DEFAULT_FUN_FACT_THEME
    } else {
        theme
    };
    endpoint_url(base, "theme", theme)
}
