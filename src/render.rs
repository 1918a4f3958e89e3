//! Rendering sink
//!
//! Board actions report everything they show through [`Renderer`]. The CLI
//! ships [`TerminalRenderer`]; other front ends implement the trait.

use std::io::Write;

use serde_json::json;

use crate::category::Section;
use crate::clipboard::CopyFeedback;
use crate::payload::Via;

pub trait Renderer: Send + Sync {
    /// Transient section status such as `Loading...` or `Error: network 500`
    fn show_status(&self, section: Section, message: &str);
    fn show_motivation(&self, text: &str, via: Via);
    fn show_joke(&self, title: &str, body: Option<&str>, via: Via);
    fn show_facts(&self, titles: &[String], via: Via);
    fn show_copy_feedback(&self, section: Section, feedback: CopyFeedback);
}

/// `fetched via: direct` style meta line shown above each result
pub fn via_line(via: Via) -> String {
    format!("fetched via: {}", via)
}

/// Writes to stdout, either as readable text or one JSON object per event
#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer {
    json: bool,
    quiet_status: bool,
}

impl TerminalRenderer {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            quiet_status: false,
        }
    }

    /// Drop `Loading...`-style status lines (errors still print)
    pub fn quiet_status(mut self, quiet: bool) -> Self {
        self.quiet_status = quiet;
        self
    }

    fn emit(&self, event: serde_json::Value, text: impl FnOnce() -> String) {
        let line = if self.json {
            event.to_string()
        } else {
            text()
        };
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}", line);
    }
}

impl Renderer for TerminalRenderer {
    fn show_status(&self, section: Section, message: &str) {
        if self.quiet_status && !message.starts_with("Error") {
            return;
        }
        self.emit(
            json!({"event": "status", "section": section, "message": message}),
            || format!("[{}] {}", section, message),
        );
    }

    fn show_motivation(&self, text: &str, via: Via) {
        self.emit(
            json!({"event": "motivation", "via": via, "text": text}),
            || format!("{}\n{}", via_line(via), text),
        );
    }

    fn show_joke(&self, title: &str, body: Option<&str>, via: Via) {
        self.emit(
            json!({"event": "dad_joke", "via": via, "title": title, "body": body}),
            || match body {
                Some(body) => format!("{}\n{}\n{}", via_line(via), title, body),
                None => format!("{}\n{}", via_line(via), title),
            },
        );
    }

    fn show_facts(&self, titles: &[String], via: Via) {
        self.emit(
            json!({"event": "fun_facts", "via": via, "titles": titles}),
            || {
                let mut text = titles
                    .iter()
                    .map(|t| format!("  • {}", t))
                    .collect::<Vec<_>>()
                    .join("\n");
                text.push('\n');
                text.push_str(&via_line(via));
                text
            },
        );
    }

    fn show_copy_feedback(&self, section: Section, feedback: CopyFeedback) {
        if feedback == CopyFeedback::Idle {
            return;
        }
        self.emit(
            json!({"event": "copy", "section": section, "feedback": feedback}),
            || format!("[{}] {}", section, feedback.label()),
        );
    }
}
