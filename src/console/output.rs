//! Output log
//!
//! Append-only list of tagged lines. The only way lines leave the log is a
//! full [`OutputLog::clear`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Out,
    Err,
}

/// A single rendered console line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLine {
    pub kind: LineKind,
    pub text: String,
}

impl OutputLine {
    pub fn out(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Out,
            text: text.into(),
        }
    }

    pub fn err(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Err,
            text: text.into(),
        }
    }

    pub fn is_err(&self) -> bool {
        self.kind == LineKind::Err
    }
}

#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    lines: Vec<OutputLine>,
    /// Set whenever the log grows; the host takes it to scroll to the bottom.
    scroll_pending: bool,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, lines: impl IntoIterator<Item = OutputLine>) {
        let before = self.lines.len();
        self.lines.extend(lines);
        if self.lines.len() > before {
            self.scroll_pending = true;
        }
    }

    pub fn push(&mut self, line: OutputLine) {
        self.append(std::iter::once(line));
    }

    /// Append multi-line text, one line per `\n`, all of the same kind.
    pub fn print(&mut self, text: &str, kind: LineKind) {
        self.append(text.split('\n').map(|line| OutputLine {
            kind,
            text: line.to_string(),
        }));
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Take the pending scroll-to-bottom request, if any.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }
}
