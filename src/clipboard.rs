//! Clipboard sink
//!
//! The board hands copyable text to a [`ClipboardSink`]. The CLI pipes it into
//! whatever command the user configured (`wl-copy`, `xclip -selection
//! clipboard`, `pbcopy`, ...).

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::ClipboardError;

/// How long copy feedback stays visible before reverting to [`CopyFeedback::Idle`]
pub const COPY_FEEDBACK_MS: u64 = 1200;

/// Label state of a section's copy button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyFeedback {
    Idle,
    Copied,
    Failed,
}

impl CopyFeedback {
    pub fn label(&self) -> &'static str {
        match self {
            CopyFeedback::Idle => "Copy",
            CopyFeedback::Copied => "Copied!",
            CopyFeedback::Failed => "Failed",
        }
    }
}

#[async_trait]
pub trait ClipboardSink: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Pipes text into an external command's stdin
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
    timeout_ms: u64,
}

impl CommandClipboard {
    /// Split a command line on whitespace; the first word is the program.
    pub fn from_command_line(command: &str, timeout_ms: u64) -> Result<Self, ClipboardError> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next().ok_or(ClipboardError::NotConfigured)?;
        Ok(Self {
            program,
            args: words.collect(),
            timeout_ms,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    async fn pipe(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ClipboardError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ClipboardError::Write {
                    message: e.to_string(),
                })?;
            // close stdin so the command sees EOF
            drop(stdin);
        }

        let status = child.wait().await.map_err(|e| ClipboardError::Write {
            message: e.to_string(),
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Exit {
                code: status.code(),
            })
        }
    }
}

#[async_trait]
impl ClipboardSink for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        tokio::time::timeout(Duration::from_millis(self.timeout_ms), self.pipe(text))
            .await
            .map_err(|_| ClipboardError::Timeout {
                timeout_ms: self.timeout_ms,
            })?
    }
}

/// Clipboard for setups without one; every write fails with `NotConfigured`.
#[derive(Debug, Clone, Default)]
pub struct NoClipboard;

#[async_trait]
impl ClipboardSink for NoClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_parsing() {
        let clip = CommandClipboard::from_command_line("xclip -selection clipboard", 1000).unwrap();
        assert_eq!(clip.program(), "xclip");
        assert_eq!(clip.args().to_vec(), vec!["-selection", "clipboard"]);
    }

    #[test]
    fn test_empty_command_line() {
        assert!(matches!(
            CommandClipboard::from_command_line("   ", 1000),
            Err(ClipboardError::NotConfigured)
        ));
    }

    #[test]
    fn test_feedback_labels() {
        assert_eq!(CopyFeedback::Idle.label(), "Copy");
        assert_eq!(CopyFeedback::Copied.label(), "Copied!");
        assert_eq!(CopyFeedback::Failed.label(), "Failed");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_pipe_into_cat() {
        let clip = CommandClipboard::from_command_line("cat", 5000).unwrap();
        assert!(clip.write_text("hello").await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command() {
        let clip = CommandClipboard::from_command_line("false", 5000).unwrap();
        assert!(clip.write_text("hello").await.is_err());
    }

    #[tokio::test]
    async fn test_missing_program() {
        let clip =
            CommandClipboard::from_command_line("definitely-not-a-clipboard-tool-xyz", 5000).unwrap();
        assert!(matches!(
            clip.write_text("hello").await,
            Err(ClipboardError::Spawn { .. })
        ));
    }

    #[tokio::test]
    async fn test_no_clipboard() {
        assert!(NoClipboard.write_text("x").await.is_err());
    }
}
