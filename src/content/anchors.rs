//! Scroll targets for the `open` command
//!
//! Maps the nicknames a visitor types to the anchor the host should scroll
//! to. The host decides whether an anchor actually exists.

use std::fmt;

/// Where a scroll request points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScrollTarget {
    /// The top of the document
    Root,
    /// An element id, stored with its leading `#`
    Anchor(String),
}

impl ScrollTarget {
    pub fn anchor(id: &str) -> Self {
        if id.starts_with('#') {
            ScrollTarget::Anchor(id.to_string())
        } else {
            ScrollTarget::Anchor(format!("#{id}"))
        }
    }

    /// Selector text echoed back to the visitor.
    pub fn selector(&self) -> &str {
        match self {
            ScrollTarget::Root => "body",
            ScrollTarget::Anchor(id) => id,
        }
    }
}

impl fmt::Display for ScrollTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Alias table plus the suggestions offered by tab completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorTable {
    routes: Vec<(ScrollTarget, Vec<String>)>,
    suggestions: Vec<String>,
}

impl AnchorTable {
    pub fn new(routes: Vec<(ScrollTarget, Vec<String>)>, suggestions: Vec<String>) -> Self {
        Self {
            routes,
            suggestions,
        }
    }

    /// Resolve a typed target. Literal `#ids` pass through untouched.
    pub fn resolve(&self, target: &str) -> Option<ScrollTarget> {
        let target = target.to_lowercase();
        if target.starts_with('#') {
            return Some(ScrollTarget::Anchor(target));
        }
        self.routes
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|a| *a == target))
            .map(|(dest, _)| dest.clone())
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}

impl Default for AnchorTable {
    fn default() -> Self {
        let route = |dest: ScrollTarget, aliases: &[&str]| {
            (dest, aliases.iter().map(|a| a.to_string()).collect())
        };
        let routes = vec![
            route(ScrollTarget::anchor("quote"), &["quote", "quotes"]),
            route(ScrollTarget::anchor("timeline"), &["timeline", "time"]),
            route(ScrollTarget::anchor("human"), &["human", "id", "hv", "verify"]),
            route(ScrollTarget::anchor("library"), &["library", "books"]),
            route(
                ScrollTarget::anchor("podcasts"),
                &["podcasts", "podcast", "audio"],
            ),
            route(ScrollTarget::Root, &["/", "home", "top"]),
            route(ScrollTarget::anchor("hero"), &["hero"]),
            route(
                ScrollTarget::anchor("terminal"),
                &["terminal", "console", "shell"],
            ),
            route(ScrollTarget::anchor("footer"), &["footer", "contact"]),
        ];

        let suggestions = [
            "#hero", "#quote", "#timeline", "#terminal", "#human", "#library", "#podcasts",
            "#footer", "hero", "quote", "timeline", "terminal", "human", "library", "podcasts",
            "footer", "top", "home", "/",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self::new(routes, suggestions)
    }
}
