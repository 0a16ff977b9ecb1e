//! Tab completion
//!
//! Completes the token under the caret against a candidate list chosen by
//! the token's position. A unique match is inserted outright. Several
//! matches are only extended as far as they agree; when nothing more can be
//! added, a second Tab on the same prefix within the double-tab window lists
//! every match.
//!
//! Carets are measured in characters, not bytes.

use crate::content::{AnchorTable, ContentRegistry};
use std::time::{Duration, Instant};

/// Default window for the double-tab listing.
pub const DOUBLE_TAB_WINDOW: Duration = Duration::from_millis(600);

/// Candidate lists: command names for the first token, per-command argument
/// lists for the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionTable {
    commands: Vec<String>,
    arguments: Vec<(String, Vec<String>)>,
}

impl CompletionTable {
    pub fn new(commands: Vec<String>, arguments: Vec<(String, Vec<String>)>) -> Self {
        Self {
            commands,
            arguments,
        }
    }

    /// Table for the built-in command set over the given site.
    pub fn for_site(registry: &ContentRegistry, anchors: &AnchorTable) -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self::new(
            super::commands::Command::NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vec![
                ("cat".to_string(), registry.cat_candidates()),
                ("open".to_string(), anchors.suggestions().to_vec()),
                ("ls".to_string(), strings(&["-l"])),
                ("rm".to_string(), strings(&["-rf", "/"])),
                ("man".to_string(), strings(&["human", "terminal"])),
            ],
        )
    }

    /// Candidates for the token at `token_index` of a line whose first token
    /// is `command` (already lowercased).
    pub fn candidates(&self, token_index: usize, command: &str) -> &[String] {
        if token_index == 0 {
            return &self.commands;
        }
        self.arguments
            .iter()
            .find(|(name, _)| name == command)
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }
}

/// What the previous completion attempt looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastCompletion {
    pub prefix: String,
    pub at: Instant,
    pub matches: Vec<String>,
}

/// Result of one Tab press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// No candidate starts with the prefix
    NoMatch,
    /// The token was replaced by the only match
    Unique { input: String, caret: usize },
    /// The prefix was extended to the matches' common prefix
    Extended { input: String, caret: usize },
    /// Several matches, nothing to add; press again to list them
    Ambiguous,
    /// Second press on the same prefix inside the window
    Listing(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Completer {
    table: CompletionTable,
    window: Duration,
    last: Option<LastCompletion>,
}

impl Completer {
    pub fn new(table: CompletionTable, window: Duration) -> Self {
        Self {
            table,
            window,
            last: None,
        }
    }

    pub fn table(&self) -> &CompletionTable {
        &self.table
    }

    pub fn last(&self) -> Option<&LastCompletion> {
        self.last.as_ref()
    }

    pub fn complete(&mut self, input: &str, caret: usize, now: Instant) -> Completion {
        let chars: Vec<char> = input.chars().collect();
        let caret = caret.min(chars.len());

        let mut start = caret;
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let mut end = caret;
        while end < chars.len() && !chars[end].is_whitespace() {
            end += 1;
        }

        let before: String = chars[..start].iter().collect();
        let prefix: String = chars[start..caret].iter().collect();
        let token_index = before.split_whitespace().count();
        let command = input
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();

        let matches: Vec<String> = self
            .table
            .candidates(token_index, &command)
            .iter()
            .filter(|c| c.starts_with(&prefix))
            .cloned()
            .collect();

        tracing::debug!(
            "complete prefix={:?} token_index={} matches={}",
            prefix,
            token_index,
            matches.len()
        );

        match matches.as_slice() {
            [] => Completion::NoMatch,
            [only] => {
                let after: String = chars[end..].iter().collect();
                let mut next = before;
                next.push_str(only);
                if !after.starts_with(char::is_whitespace) {
                    next.push(' ');
                }
                let new_caret = next.chars().count();
                next.push_str(&after);
                self.remember(only.clone(), now, matches);
                Completion::Unique {
                    input: next,
                    caret: new_caret,
                }
            }
            _ => {
                let lcp = longest_common_prefix(&matches);
                if lcp.chars().count() > prefix.chars().count() {
                    let mut next = before;
                    next.push_str(&lcp);
                    let new_caret = next.chars().count();
                    next.extend(&chars[caret..]);
                    self.remember(lcp, now, matches);
                    return Completion::Extended {
                        input: next,
                        caret: new_caret,
                    };
                }

                let repeated = self.last.as_ref().is_some_and(|last| {
                    last.prefix == prefix && now.saturating_duration_since(last.at) < self.window
                });
                self.remember(prefix, now, matches.clone());
                if repeated {
                    Completion::Listing(matches)
                } else {
                    Completion::Ambiguous
                }
            }
        }
    }

    fn remember(&mut self, prefix: String, at: Instant, matches: Vec<String>) {
        self.last = Some(LastCompletion {
            prefix,
            at,
            matches,
        });
    }
}

/// Longest prefix shared by every string, compared by character.
pub fn longest_common_prefix(items: &[String]) -> String {
    let Some((first, rest)) = items.split_first() else {
        return String::new();
    };
    let mut len = first.chars().count();
    for item in rest {
        len = first
            .chars()
            .zip(item.chars())
            .take(len)
            .take_while(|(a, b)| a == b)
            .count();
        if len == 0 {
            break;
        }
    }
    first.chars().take(len).collect()
}
