//! View layer
//!
//! The page fills the screen; the console panel is docked at the bottom and
//! grows to the whole screen when maximized.

pub mod console_view;
pub mod page;

use crate::console::Console;
use page::PageView;
use console_view::ConsoleLayout;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;

/// Page area (if any is left) and console area for a frame.
pub fn split_screen(area: Rect, console: &Console) -> (Option<Rect>, Rect) {
    match console_view::preferred_height(console.view_state()) {
        None => (None, area),
        Some(height) => {
            let height = height.min(area.height);
            let [page, panel] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(height)]).areas(area);
            (Some(page).filter(|r| r.height > 0), panel)
        }
    }
}

/// Draw one frame and place the cursor on the input line when it is visible.
pub fn render(
    frame: &mut Frame,
    page: &PageView,
    console: &Console,
    log_offset: usize,
) -> ConsoleLayout {
    let (page_area, console_area) = split_screen(frame.area(), console);
    if let Some(area) = page_area {
        page::render_page(frame, area, page);
    }
    let layout = console_view::render_console(frame, console_area, console, log_offset);
    if let Some(position) = layout.cursor {
        frame.set_cursor_position(position);
    }
    layout
}
