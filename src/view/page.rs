//! The page behind the console
//!
//! A read-only rendition of the homepage as a list of styled lines with
//! named anchors. It is the scroll host the `open` command talks to.

use crate::console::commands::ScrollHost;
use crate::content::site::{Entry, SiteContent};
use crate::content::ScrollTarget;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLineKind {
    Title,
    Heading,
    Body,
    Quote,
    Muted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLine {
    pub kind: PageLineKind,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct PageView {
    lines: Vec<PageLine>,
    /// Anchor selector and the line it starts at
    anchors: Vec<(String, usize)>,
    scroll: usize,
}

impl PageView {
    pub fn from_site(site: &SiteContent) -> Self {
        let mut page = Self::default();

        page.anchor("#hero");
        page.push(PageLineKind::Title, &site.hero);
        page.blank();

        page.anchor("#quote");
        page.push(PageLineKind::Quote, &format!("“{}”", site.quote.text));
        page.push(PageLineKind::Muted, &format!("— {}", site.quote.author));
        page.blank();

        page.section("#timeline", "Timeline");
        for entry in &site.timeline {
            page.push_text(PageLineKind::Body, &entry.milestone());
        }
        page.blank();

        page.section("#human", "Human Verification");
        page.push(
            PageLineKind::Body,
            &format!("{} • ID: {}", site.human.name, site.human.id),
        );
        page.push_text(PageLineKind::Muted, &site.human.details);
        page.blank();
        page.push(PageLineKind::Heading, "Hobbies");
        page.entries(&site.human.hobbies);

        page.section("#library", "Library");
        page.entries(&site.library);

        page.section("#podcasts", "Podcasts");
        page.entries(&site.podcasts);

        page.section("#terminal", "Terminal");
        page.push(
            PageLineKind::Muted,
            "The console below reads this page as files. Try: cat all",
        );
        page.blank();

        page.section("#footer", "Links");
        for (label, value) in site.links.rows() {
            page.push(PageLineKind::Body, &format!("{label} — {value}"));
        }

        page
    }

    fn anchor(&mut self, selector: &str) {
        self.anchors.push((selector.to_string(), self.lines.len()));
    }

    fn section(&mut self, selector: &str, title: &str) {
        self.anchor(selector);
        self.push(PageLineKind::Heading, title);
    }

    fn entries(&mut self, entries: &[Entry]) {
        for entry in entries {
            self.push(PageLineKind::Body, &entry.bullet());
        }
        self.blank();
    }

    fn push(&mut self, kind: PageLineKind, text: &str) {
        self.lines.push(PageLine {
            kind,
            text: text.to_string(),
        });
    }

    fn push_text(&mut self, kind: PageLineKind, text: &str) {
        for line in text.split('\n') {
            self.push(kind, line);
        }
    }

    fn blank(&mut self) {
        self.push(PageLineKind::Body, "");
    }

    pub fn lines(&self) -> &[PageLine] {
        &self.lines
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Line an anchor starts at. `body` is the top of the page.
    pub fn anchor_line(&self, selector: &str) -> Option<usize> {
        if selector == ScrollTarget::Root.selector() {
            return Some(0);
        }
        self.anchors
            .iter()
            .find(|(name, _)| name == selector)
            .map(|(_, line)| *line)
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.lines.len().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }
}

impl ScrollHost for PageView {
    fn request_scroll(&mut self, target: &ScrollTarget) -> bool {
        match self.anchor_line(target.selector()) {
            Some(line) => {
                tracing::debug!("page scroll to {} at line {}", target, line);
                self.scroll = line;
                true
            }
            None => {
                tracing::warn!("page has no element {}", target);
                false
            }
        }
    }
}

fn style_for(kind: PageLineKind) -> Style {
    match kind {
        PageLineKind::Title => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        PageLineKind::Heading => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        PageLineKind::Quote => Style::default().add_modifier(Modifier::ITALIC),
        PageLineKind::Muted => Style::default().fg(Color::DarkGray),
        PageLineKind::Body => Style::default(),
    }
}

/// Render the page from its scroll offset downwards.
pub fn render_page(frame: &mut Frame, area: Rect, page: &PageView) {
    if area.height == 0 {
        return;
    }
    let lines: Vec<Line> = page
        .lines
        .iter()
        .skip(page.scroll)
        .take(area.height as usize)
        .map(|line| Line::styled(line.text.clone(), style_for(line.kind)))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}
