//! Console panel rendering

use crate::console::output::LineKind;
use crate::console::viewport::ViewState;
use crate::console::Console;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const CLOSED_HINT: &str = " console closed · Enter to reopen ";
const CONTROLS: &str = " F9 _  F10 □  ^W × ";

fn prompt_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

fn line_style(kind: LineKind) -> Style {
    match kind {
        LineKind::Out => Style::default(),
        LineKind::Err => Style::default().fg(Color::Red),
    }
}

/// Rows the panel wants for a given state. `None` means "whatever is left".
pub fn preferred_height(state: ViewState) -> Option<u16> {
    match state {
        ViewState::Closed => Some(1),
        ViewState::Open {
            minimized: true, ..
        } => Some(1),
        ViewState::Open {
            maximized: true, ..
        } => None,
        ViewState::Open { .. } => Some(12),
    }
}

/// Where the panel put things, for the host to act on after a draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleLayout {
    /// Terminal cursor on the input line, if it is visible
    pub cursor: Option<Position>,
    /// Rows available to the log
    pub log_rows: usize,
    /// Scrollback actually applied, clamped so the log area stays full
    pub log_offset: usize,
}

/// Largest scrollback that still fills `rows` rows of a `len`-line log.
pub fn max_log_offset(len: usize, rows: usize) -> usize {
    len.saturating_sub(rows)
}

/// Render the console panel.
///
/// `log_offset` is how many lines the log is scrolled up from its bottom.
pub fn render_console(
    frame: &mut Frame,
    area: Rect,
    console: &Console,
    log_offset: usize,
) -> ConsoleLayout {
    if area.height == 0 || area.width == 0 {
        return ConsoleLayout::default();
    }

    let state = console.view_state();
    if !state.is_open() {
        let bar = Paragraph::new(Line::styled(
            CLOSED_HINT,
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(bar, area);
        return ConsoleLayout::default();
    }

    let title = format!(" {}: {} ", console.profile().user, console.profile().cwd);
    if !state.is_visible() {
        let bar = Line::from(vec![
            Span::styled(title, prompt_style()),
            Span::styled(CONTROLS, Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(bar), area);
        return ConsoleLayout::default();
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, prompt_style()))
        .title_bottom(Line::styled(CONTROLS, Style::default().fg(Color::DarkGray)));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return ConsoleLayout::default();
    }

    let [log_area, input_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let lines = console.lines();
    let visible = log_area.height as usize;
    let log_offset = log_offset.min(max_log_offset(lines.len(), visible));
    let end = lines.len() - log_offset;
    let start = end.saturating_sub(visible);
    let log: Vec<Line> = lines[start..end]
        .iter()
        .map(|line| Line::styled(line.text.clone(), line_style(line.kind)))
        .collect();
    frame.render_widget(Paragraph::new(log), log_area);

    let cursor = render_input(frame, input_area, console);
    ConsoleLayout {
        cursor: Some(cursor),
        log_rows: visible,
        log_offset,
    }
}

/// Draw the prompt and input, scrolled sideways so the caret stays in view.
fn render_input(frame: &mut Frame, area: Rect, console: &Console) -> Position {
    let prompt = format!("{} ", console.prompt());
    let before_caret: String = console.input().chars().take(console.caret()).collect();
    let caret_column = prompt.width() + before_caret.width();
    let last_column = usize::from(area.width.saturating_sub(1));

    let wanted = caret_column.saturating_sub(last_column);
    let (prompt_rest, prompt_skipped) = skip_columns(&prompt, wanted);
    let (input_rest, input_skipped) =
        skip_columns(console.input(), wanted.saturating_sub(prompt_skipped));
    let skipped = prompt_skipped + input_skipped;

    let input_line = Line::from(vec![
        Span::styled(prompt_rest.to_string(), prompt_style()),
        Span::raw(input_rest.to_string()),
    ]);
    frame.render_widget(Paragraph::new(input_line), area);

    let column = caret_column.saturating_sub(skipped).min(last_column);
    Position {
        x: area.x + u16::try_from(column).unwrap_or(area.width.saturating_sub(1)),
        y: area.y,
    }
}

/// Drop at least `columns` display columns from the front of `text`.
/// Returns the rest and how many columns were dropped.
fn skip_columns(text: &str, columns: usize) -> (&str, usize) {
    let mut dropped = 0;
    for (idx, ch) in text.char_indices() {
        if dropped >= columns {
            return (&text[idx..], dropped);
        }
        dropped += ch.width().unwrap_or(0);
    }
    ("", dropped)
}
