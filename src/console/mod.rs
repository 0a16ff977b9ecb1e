//! The interactive console
//!
//! [`Console`] owns one session: the input line and its caret, the history
//! navigator, the completion engine, the output log, the viewport and the
//! auto-open timer. It is headless; a host feeds it keys and reads its state
//! back to draw it.

pub mod commands;
pub mod completion;
pub mod history;
pub mod output;
pub mod viewport;

use crate::config::ConsoleProfile;
use crate::content::{AnchorTable, ContentRegistry};
use crate::services::scheduler::OneShot;
use crate::services::time_source::SharedTimeSource;
use commands::{Context, Reply, ScrollHost};
use completion::{Completer, Completion, CompletionTable};
use history::History;
use output::{OutputLine, OutputLog};
use std::sync::Arc;
use viewport::{ViewState, Viewport};

pub struct Console {
    profile: ConsoleProfile,
    registry: Arc<ContentRegistry>,
    anchors: Arc<AnchorTable>,
    clock: SharedTimeSource,
    completer: Completer,
    history: History,
    log: OutputLog,
    viewport: Viewport,
    /// Current input line
    input: String,
    /// Caret position in characters
    caret: usize,
    auto_open: OneShot,
}

impl Console {
    /// Mount a console: welcome lines in the log, closed, auto-open scheduled.
    pub fn new(
        profile: ConsoleProfile,
        registry: Arc<ContentRegistry>,
        anchors: Arc<AnchorTable>,
        clock: SharedTimeSource,
    ) -> Self {
        let completer = Completer::new(
            CompletionTable::for_site(&registry, &anchors),
            profile.double_tab_window(),
        );
        let mut log = OutputLog::new();
        log.append(profile.welcome.iter().map(|line| OutputLine::out(line.as_str())));
        let auto_open = OneShot::after(clock.clone(), profile.auto_open_delay());

        tracing::info!(
            "console mounted as {}, auto-open in {:?}",
            profile.prompt(),
            profile.auto_open_delay()
        );

        let mut console = Self {
            profile,
            registry,
            anchors,
            clock,
            completer,
            history: History::new(),
            log,
            viewport: Viewport::new(ViewState::Closed),
            input: String::new(),
            caret: 0,
            auto_open,
        };
        console.tick();
        console
    }

    /// Drive timers. Call from the host loop on every iteration.
    pub fn tick(&mut self) {
        if self.auto_open.poll() {
            tracing::debug!("auto-open fired");
            self.viewport.reopen();
        }
    }

    /// Cancel pending timers. The console stays readable afterwards.
    pub fn teardown(&mut self) {
        if self.auto_open.is_pending() {
            tracing::debug!("auto-open cancelled");
        }
        self.auto_open.cancel();
    }

    pub fn auto_open_pending(&self) -> bool {
        self.auto_open.is_pending()
    }

    pub fn profile(&self) -> &ConsoleProfile {
        &self.profile
    }

    pub fn prompt(&self) -> String {
        self.profile.prompt()
    }

    pub fn lines(&self) -> &[OutputLine] {
        self.log.lines()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn view_state(&self) -> ViewState {
        self.viewport.state()
    }

    // ---- submit ----

    /// Submit the input line. The buffer is always cleared.
    pub fn submit(&mut self, host: &mut dyn ScrollHost) {
        let raw = std::mem::take(&mut self.input);
        self.caret = 0;
        self.submit_line(&raw, host);
    }

    /// Run one line as if it had been typed and submitted.
    pub fn submit_line(&mut self, raw: &str, host: &mut dyn ScrollHost) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }
        self.history.push(line);
        self.log
            .push(OutputLine::out(format!("{} {}", self.profile.prompt(), line)));

        let mut tokens = line.split_whitespace();
        let name = tokens.next().unwrap_or_default();
        let args: Vec<&str> = tokens.collect();

        let mut ctx = Context {
            profile: &self.profile,
            registry: &self.registry,
            anchors: &self.anchors,
            clock: self.clock.as_ref(),
            host,
        };
        match commands::dispatch(name, &args, &mut ctx) {
            Reply::Lines(lines) => self.log.append(lines),
            Reply::Clear => self.log.clear(),
        }
    }

    // ---- completion ----

    /// Tab: complete the token under the caret.
    pub fn complete(&mut self) {
        let now = self.clock.now();
        match self.completer.complete(&self.input, self.caret, now) {
            Completion::Unique { input, caret } | Completion::Extended { input, caret } => {
                self.input = input;
                self.caret = caret;
            }
            Completion::Listing(matches) => {
                self.log.push(OutputLine::out(matches.join("  ")));
            }
            Completion::NoMatch | Completion::Ambiguous => {}
        }
    }

    // ---- history ----

    /// ArrowUp: recall an older line.
    pub fn recall_previous(&mut self) {
        if let Some(line) = self.history.older() {
            let line = line.to_string();
            self.set_input(line);
        }
    }

    /// ArrowDown: recall a newer line, or empty the input past the newest.
    pub fn recall_next(&mut self) {
        let line = self.history.newer().to_string();
        self.set_input(line);
    }

    // ---- line editing ----

    /// Replace the input line and put the caret at its end.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.caret = self.input.chars().count();
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_offset(self.caret);
        self.input.insert(at, ch);
        self.caret += 1;
    }

    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(ch);
        }
    }

    pub fn backspace(&mut self) {
        if self.caret == 0 {
            return;
        }
        self.caret -= 1;
        let at = self.byte_offset(self.caret);
        self.input.remove(at);
    }

    pub fn delete(&mut self) {
        if self.caret >= self.input.chars().count() {
            return;
        }
        let at = self.byte_offset(self.caret);
        self.input.remove(at);
    }

    pub fn move_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.caret = (self.caret + 1).min(self.input.chars().count());
    }

    pub fn move_home(&mut self) {
        self.caret = 0;
    }

    pub fn move_end(&mut self) {
        self.caret = self.input.chars().count();
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    // ---- viewport ----

    /// Closing or reopening by hand wins over a pending auto-open.
    pub fn close(&mut self) -> bool {
        self.teardown();
        self.viewport.close()
    }

    pub fn reopen(&mut self) -> bool {
        self.teardown();
        self.viewport.reopen()
    }

    pub fn toggle_minimize(&mut self) -> bool {
        self.viewport.toggle_minimize()
    }

    pub fn toggle_maximize(&mut self) -> bool {
        self.viewport.toggle_maximize()
    }

    /// Take the pending request to focus the input line.
    pub fn take_focus_request(&mut self) -> bool {
        self.viewport.take_focus_request()
    }

    /// Take the pending request to scroll the log to its bottom.
    pub fn take_scroll_to_bottom(&mut self) -> bool {
        self.log.take_scroll_request()
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ScrollTarget;
    use crate::services::time_source::TestTimeSource;
    use std::time::Duration;

    fn console_with(profile: ConsoleProfile) -> (Console, Arc<TestTimeSource>) {
        let clock = Arc::new(TestTimeSource::new());
        let console = Console::new(
            profile,
            Arc::new(ContentRegistry::default()),
            Arc::new(AnchorTable::default()),
            clock.clone(),
        );
        (console, clock)
    }

    fn console() -> (Console, Arc<TestTimeSource>) {
        console_with(ConsoleProfile::default())
    }

    fn no_page(_: &ScrollTarget) -> bool {
        false
    }

    #[test]
    fn test_mount_shows_welcome_closed() {
        let (console, _) = console();
        assert_eq!(console.lines().len(), 2);
        assert_eq!(console.view_state(), ViewState::Closed);
        assert!(console.auto_open_pending());
        assert_eq!(console.input(), "");
    }

    #[test]
    fn test_zero_delay_opens_at_mount() {
        let profile = ConsoleProfile {
            auto_open_delay_ms: 0,
            ..ConsoleProfile::default()
        };
        let (mut console, _) = console_with(profile);
        assert_eq!(console.view_state(), ViewState::OPEN);
        assert!(console.take_focus_request());
    }

    #[test]
    fn test_blank_submit_clears_buffer_only() {
        let (mut console, _) = console();
        console.set_input("   ");
        console.submit(&mut no_page);
        assert_eq!(console.input(), "");
        assert_eq!(console.lines().len(), 2);
        assert!(console.history().entries().is_empty());
    }

    #[test]
    fn test_submit_echoes_trimmed_line() {
        let (mut console, _) = console();
        console.set_input("  pwd  ");
        console.submit(&mut no_page);

        let lines = console.lines();
        assert_eq!(lines[2], OutputLine::out("chirag@human / % pwd"));
        assert_eq!(lines[3], OutputLine::out("/"));
        assert_eq!(console.history().entries(), ["pwd"]);
    }

    #[test]
    fn test_clear_leaves_log_empty() {
        let (mut console, _) = console();
        console.submit_line("clear", &mut no_page);
        assert!(console.lines().is_empty());
    }

    #[test]
    fn test_editing_is_char_based() {
        let (mut console, _) = console();
        console.insert_str("café");
        console.move_left();
        console.backspace();
        assert_eq!(console.input(), "caé");
        console.move_home();
        console.delete();
        console.move_end();
        console.insert_char('!');
        assert_eq!(console.input(), "aé!");
        assert_eq!(console.caret(), 3);
    }

    #[test]
    fn test_tab_completes_into_buffer() {
        let (mut console, _) = console();
        console.set_input("ca");
        console.complete();
        assert_eq!(console.input(), "cat ");
        assert_eq!(console.caret(), 4);
    }

    #[test]
    fn test_recall_puts_caret_at_end() {
        let (mut console, _) = console();
        console.submit_line("help", &mut no_page);
        console.submit_line("tree", &mut no_page);

        console.recall_previous();
        assert_eq!(console.input(), "tree");
        assert_eq!(console.caret(), 4);
        console.recall_previous();
        assert_eq!(console.input(), "help");
        console.recall_next();
        assert_eq!(console.input(), "tree");
        console.recall_next();
        assert_eq!(console.input(), "");
        assert_eq!(console.caret(), 0);
    }

    #[test]
    fn test_teardown_cancels_auto_open() {
        let (mut console, clock) = console();
        console.teardown();
        clock.advance(Duration::from_secs(5));
        console.tick();
        assert_eq!(console.view_state(), ViewState::Closed);
    }

    #[test]
    fn test_manual_close_beats_pending_auto_open() {
        let (mut console, clock) = console();
        assert!(console.reopen());
        assert!(console.close());
        assert!(!console.auto_open_pending());

        clock.advance(Duration::from_secs(1));
        console.tick();
        assert_eq!(console.view_state(), ViewState::Closed);
    }
}
