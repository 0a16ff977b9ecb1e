//! Terminal mode management
//!
//! `TerminalModes` records which of raw mode, the alternate screen and
//! bracketed paste were enabled, and `undo()` restores exactly those.

use anyhow::{Context, Result};
use crossterm::{
    cursor::SetCursorStyle,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use std::io::{stdout, Write};

/// Tracks which terminal modes have been enabled and provides cleanup.
#[derive(Debug, Default)]
pub struct TerminalModes {
    raw_mode: bool,
    alternate_screen: bool,
    bracketed_paste: bool,
}

impl TerminalModes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable raw mode, the alternate screen and bracketed paste.
    ///
    /// On error, undoes any partially enabled modes.
    pub fn enable() -> Result<Self> {
        let mut modes = Self::new();

        enable_raw_mode().context("failed to enable raw mode")?;
        modes.raw_mode = true;
        tracing::debug!("Enabled raw mode");

        if let Err(e) = stdout().execute(EnterAlternateScreen) {
            modes.undo();
            return Err(e).context("failed to enter alternate screen");
        }
        modes.alternate_screen = true;
        tracing::debug!("Entered alternate screen");

        if let Err(e) = stdout().execute(EnableBracketedPaste) {
            tracing::warn!("Failed to enable bracketed paste: {}", e);
        } else {
            modes.bracketed_paste = true;
            tracing::debug!("Enabled bracketed paste mode");
        }

        Ok(modes)
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn undo(&mut self) {
        if self.bracketed_paste {
            let _ = stdout().execute(DisableBracketedPaste);
            self.bracketed_paste = false;
            tracing::debug!("Disabled bracketed paste");
        }

        let _ = stdout().execute(SetCursorStyle::DefaultUserShape);

        // Raw mode goes before leaving the alternate screen for cleaner output
        if self.raw_mode {
            let _ = disable_raw_mode();
            self.raw_mode = false;
            tracing::debug!("Disabled raw mode");
        }

        if self.alternate_screen {
            let _ = stdout().execute(LeaveAlternateScreen);
            self.alternate_screen = false;
            tracing::debug!("Left alternate screen");
        }

        let _ = stdout().flush();
    }
}

impl Drop for TerminalModes {
    fn drop(&mut self) {
        self.undo();
    }
}

/// Unconditionally restore terminal state, for panic hooks.
pub fn emergency_cleanup() {
    let _ = stdout().execute(DisableBracketedPaste);
    let _ = stdout().execute(SetCursorStyle::DefaultUserShape);
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = stdout().flush();
}
