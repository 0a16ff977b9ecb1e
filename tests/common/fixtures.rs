// Console fixtures

use chrono::{Local, TimeZone};
use site_console::config::ConsoleProfile;
use site_console::console::commands::ScrollHost;
use site_console::console::output::OutputLine;
use site_console::console::Console;
use site_console::content::{AnchorTable, ContentRegistry, ScrollTarget};
use site_console::services::time_source::TestTimeSource;
use std::sync::Arc;

/// Scroll host that records every request and knows a fixed set of anchors.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub known: Vec<String>,
    pub requests: Vec<ScrollTarget>,
}

impl RecordingHost {
    /// A host that has every anchor the default alias table routes to.
    pub fn site() -> Self {
        let known = [
            "body",
            "#hero",
            "#quote",
            "#timeline",
            "#human",
            "#library",
            "#podcasts",
            "#terminal",
            "#footer",
        ];
        Self {
            known: known.iter().map(|s| s.to_string()).collect(),
            requests: Vec::new(),
        }
    }

    /// A host with nothing on the page.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl ScrollHost for RecordingHost {
    fn request_scroll(&mut self, target: &ScrollTarget) -> bool {
        self.requests.push(target.clone());
        self.known.iter().any(|k| k == target.selector())
    }
}

/// A mounted console over the default site with a frozen clock.
pub struct Session {
    pub console: Console,
    pub clock: Arc<TestTimeSource>,
    pub host: RecordingHost,
}

impl Session {
    pub fn new() -> Self {
        Self::with_profile(ConsoleProfile::default())
    }

    pub fn with_profile(profile: ConsoleProfile) -> Self {
        let clock = Arc::new(TestTimeSource::at(
            Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap(),
        ));
        let console = Console::new(
            profile,
            Arc::new(ContentRegistry::default()),
            Arc::new(AnchorTable::default()),
            clock.clone(),
        );
        Self {
            console,
            clock,
            host: RecordingHost::site(),
        }
    }

    /// Type `line` into the input and press Enter.
    pub fn type_and_submit(&mut self, line: &str) {
        self.console.set_input(line);
        self.console.submit(&mut self.host);
    }

    /// Lines appended by running `line`, echo excluded.
    pub fn run(&mut self, line: &str) -> Vec<OutputLine> {
        let before = self.console.lines().len();
        self.type_and_submit(line);
        self.console.lines().iter().skip(before + 1).cloned().collect()
    }

    /// Texts of the lines appended by running `line`, echo excluded.
    pub fn run_text(&mut self, line: &str) -> String {
        self.run(line)
            .into_iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
