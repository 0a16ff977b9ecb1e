//! Command history with a recall cursor
//!
//! Cursor 0 means the input line belongs to the user. Cursor `n` points at
//! the `n`-th most recent submitted line.

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line and stop recalling.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = 0;
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_recalling(&self) -> bool {
        self.cursor > 0
    }

    /// Step back towards older lines.
    ///
    /// Returns the line to show, or `None` when there is no history. At the
    /// oldest entry the cursor stays put and the oldest line is returned again.
    pub fn older(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1).min(self.entries.len());
        Some(self.current())
    }

    /// Step forward towards newer lines; past the newest the input is emptied.
    pub fn newer(&mut self) -> &str {
        if self.cursor <= 1 {
            self.cursor = 0;
            return "";
        }
        self.cursor -= 1;
        self.current()
    }

    fn current(&self) -> &str {
        &self.entries[self.entries.len() - self.cursor]
    }
}
