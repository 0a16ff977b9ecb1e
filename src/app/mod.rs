//! Terminal host
//!
//! Routes crossterm key events to the console and the page, and drains the
//! console's focus and scroll requests after every change.

use crate::config::Config;
use crate::console::Console;
use crate::content::{AnchorTable, ContentRegistry};
use crate::services::time_source::SharedTimeSource;
use crate::view::console_view::max_log_offset;
use crate::view::page::PageView;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use std::sync::Arc;

/// Lines moved by one PageUp/PageDown.
const PAGE_STEP: isize = 10;

pub struct App {
    console: Console,
    page: PageView,
    /// Lines the console log is scrolled up from its bottom
    log_offset: usize,
    /// Log rows shown by the last draw
    log_rows: usize,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, clock: SharedTimeSource) -> Self {
        let registry = Arc::new(ContentRegistry::from_site(&config.content));
        let anchors = Arc::new(AnchorTable::default());
        let console = Console::new(config.console.clone(), registry, anchors, clock);
        let mut app = Self {
            console,
            page: PageView::from_site(&config.content),
            log_offset: 0,
            log_rows: 0,
            should_quit: false,
        };
        app.drain_requests();
        app
    }

    /// Keep the console closed until the visitor asks for it.
    pub fn disable_auto_open(&mut self) {
        self.console.teardown();
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn page(&self) -> &PageView {
        &self.page
    }

    pub fn log_offset(&self) -> usize {
        self.log_offset
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advance timers. Returns true when a redraw is needed.
    pub fn tick(&mut self) -> bool {
        let before = self.console.view_state();
        self.console.tick();
        let changed = before != self.console.view_state();
        self.drain_requests() || changed
    }

    /// Handle one key press. Returns true when a redraw is needed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let state = self.console.view_state();

        match (key.code, ctrl) {
            (KeyCode::Char('c'), true) | (KeyCode::Char('q'), true) => {
                tracing::info!("quit requested");
                self.should_quit = true;
                return false;
            }
            (KeyCode::Char('w'), true) => {
                self.console.close();
            }
            (KeyCode::F(9), _) => {
                self.console.toggle_minimize();
            }
            (KeyCode::F(10), _) => {
                self.console.toggle_maximize();
            }
            (KeyCode::PageUp, _) => self.scroll(-PAGE_STEP),
            (KeyCode::PageDown, _) => self.scroll(PAGE_STEP),
            (KeyCode::Enter, _) if !state.is_open() => {
                self.console.reopen();
            }
            (KeyCode::Enter, _) if !state.is_visible() => {
                self.console.toggle_minimize();
            }
            _ if !state.is_visible() => return false,
            (KeyCode::Enter, _) => self.console.submit(&mut self.page),
            (KeyCode::Tab, _) => self.console.complete(),
            (KeyCode::Up, _) => self.console.recall_previous(),
            (KeyCode::Down, _) => self.console.recall_next(),
            (KeyCode::Backspace, _) => self.console.backspace(),
            (KeyCode::Delete, _) => self.console.delete(),
            (KeyCode::Left, _) => self.console.move_left(),
            (KeyCode::Right, _) => self.console.move_right(),
            (KeyCode::Home, _) => self.console.move_home(),
            (KeyCode::End, _) => self.console.move_end(),
            (KeyCode::Char(ch), false) if !key.modifiers.contains(KeyModifiers::ALT) => {
                self.console.insert_char(ch);
            }
            _ => return false,
        }

        self.drain_requests();
        true
    }

    /// Bracketed paste goes into the input line.
    pub fn paste(&mut self, text: &str) -> bool {
        if !self.console.view_state().is_visible() {
            return false;
        }
        self.console.insert_str(text);
        true
    }

    /// PageUp/PageDown scroll the log when the console covers the page.
    fn scroll(&mut self, delta: isize) {
        if self.console.view_state().is_maximized() {
            let max = max_log_offset(self.console.lines().len(), self.log_rows);
            self.log_offset = self.log_offset.saturating_add_signed(-delta).min(max);
        } else {
            self.page.scroll_by(delta);
        }
    }

    fn drain_requests(&mut self) -> bool {
        let focus = self.console.take_focus_request();
        let bottom = self.console.take_scroll_to_bottom();
        if focus || bottom {
            self.log_offset = 0;
        }
        focus || bottom
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let layout = crate::view::render(frame, &self.page, &self.console, self.log_offset);
        self.log_rows = layout.log_rows;
        self.log_offset = layout.log_offset;
    }
}
