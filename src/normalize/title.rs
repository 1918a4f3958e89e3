//! Title extraction from free-form fact text

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::payload::{is_present, pretty};

pub const MAX_TITLE_CHARS: usize = 120;
pub const ELLIPSIS: char = '…';

static MARKDOWN_BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("markdown bold pattern"));
static HTML_BOLD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<\s*(?:strong|b)\b[^>]*>(.*?)</\s*(?:strong|b)\s*>")
        .expect("html bold pattern")
});

/// Pull a short title out of prose.
///
/// First match wins: a `**bold**` span, a `<strong>`/`<b>` span, the first
/// sentence of the first non-empty line, or that line capped at
/// [`MAX_TITLE_CHARS`] with an ellipsis.
pub fn extract_title(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    if let Some(title) = wrapped_span(&MARKDOWN_BOLD_RE, text) {
        return title;
    }
    if let Some(title) = wrapped_span(&HTML_BOLD_RE, text) {
        return title;
    }

    let first_line = text
        .split('\n')
        .map(|line| line.trim())
        .find(|line| !line.is_empty());

    match first_line {
        Some(line) => {
            // only the first mark counts, and only past the first column
            if let Some((pos, idx)) = line
                .char_indices()
                .enumerate()
                .find(|(_, (_, c))| matches!(c, '.' | '!' | '?'))
                .map(|(pos, (idx, _))| (pos, idx))
                && pos >= 1
            {
                return line[..idx].trim().to_string();
            }
            if line.chars().count() <= MAX_TITLE_CHARS {
                line.to_string()
            } else {
                truncated(line)
            }
        }
        None => truncated(text),
    }
}

/// Title for one fact entry of any shape; non-strings pretty-print.
pub fn extract_title_value(value: &Value) -> String {
    match value {
        Value::String(s) => extract_title(s),
        v if !is_present(v) => String::new(),
        other => pretty(other),
    }
}

/// First span of `re` whose captured text is non-blank.
fn wrapped_span(re: &Regex, text: &str) -> Option<String> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn truncated(text: &str) -> String {
    let head: String = text.chars().take(MAX_TITLE_CHARS).collect();
    let mut out = head.trim().to_string();
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_markdown_bold() {
        assert_eq!(extract_title("**Hello World**"), "Hello World");
        assert_eq!(
            extract_title("Intro text **  Octopuses have three hearts ** and more."),
            "Octopuses have three hearts"
        );
    }

    #[test]
    fn test_markdown_beats_html() {
        assert_eq!(extract_title("<b>Second</b> then **First**"), "First");
    }

    #[test]
    fn test_html_bold_tags() {
        assert_eq!(extract_title("<b>Hi</b> there"), "Hi");
        assert_eq!(
            extract_title(r#"<STRONG class="x">Honey never spoils</Strong>. Archaeologists..."#),
            "Honey never spoils"
        );
        assert_eq!(extract_title("< strong >Spaced</ strong >"), "Spaced");
    }

    #[test]
    fn test_br_is_not_bold() {
        assert_eq!(extract_title("Line one<br>still going</b>"), "Line one<br>still going</b>");
    }

    #[test]
    fn test_empty_bold_falls_through() {
        assert_eq!(extract_title("**   ** Bananas are berries. Yes."), "**   ** Bananas are berries");
    }

    #[test]
    fn test_first_sentence() {
        assert_eq!(extract_title("A line that ends. And more."), "A line that ends");
        assert_eq!(extract_title("Wow! Really"), "Wow");
        assert_eq!(extract_title("Is it true? Yes"), "Is it true");
        assert_eq!(extract_title("B."), "B");
    }

    #[test]
    fn test_leading_punctuation_is_kept() {
        assert_eq!(extract_title(".hidden files are hidden"), ".hidden files are hidden");
        assert_eq!(extract_title("...Wait. Really"), "...Wait. Really");
        assert_eq!(extract_title("?!"), "?!");
    }

    #[test]
    fn test_leading_punctuation_long_line_truncated() {
        let line = format!("!{}. tail", "z".repeat(150));
        let title = extract_title(&line);
        assert_eq!(title.chars().count(), MAX_TITLE_CHARS + 1);
        assert!(title.starts_with('!'));
        assert!(title.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_later_bold_span_after_empty_one() {
        assert_eq!(extract_title("** ** x **Real**"), "Real");
        assert_eq!(extract_title("<b> </b> then <strong>Kept</strong>"), "Kept");
    }

    #[test]
    fn test_first_non_empty_line() {
        assert_eq!(
            extract_title("\r\n   \n  Cats sleep a lot  \r\nSecond line. More."),
            "Cats sleep a lot"
        );
    }

    #[test]
    fn test_long_line_truncated() {
        let line = "a".repeat(200);
        let title = extract_title(&line);
        assert_eq!(title.chars().count(), MAX_TITLE_CHARS + 1);
        assert!(title.starts_with(&"a".repeat(120)));
        assert!(title.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_exactly_max_chars_not_truncated() {
        let line = "b".repeat(MAX_TITLE_CHARS);
        assert_eq!(extract_title(&line), line);
    }

    #[test]
    fn test_whitespace_only_input() {
        assert_eq!(extract_title("  \n\t\n "), "…");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_title(""), "");
    }

    #[test]
    fn test_non_empty_input_has_bounded_title() {
        let samples = [
            "x",
            "   ",
            "no punctuation at all but fairly long text that keeps going and going without ever stopping for breath or a period anywhere in sight",
            "Ünïcödé wörds ünd möre",
            "?",
        ];
        for s in samples {
            let title = extract_title(s);
            assert!(!title.is_empty(), "empty title for {:?}", s);
            assert!(title.chars().count() <= MAX_TITLE_CHARS + 1);
        }
    }

    #[test]
    fn test_value_titles() {
        assert_eq!(extract_title_value(&json!("**A**")), "A");
        assert_eq!(extract_title_value(&json!({"a": 1})), "{\n  \"a\": 1\n}");
        assert_eq!(extract_title_value(&json!(12)), "12");
        assert_eq!(extract_title_value(&Value::Null), "");
        assert_eq!(extract_title_value(&json!(0)), "");
    }
}
