//! Console viewport state
//!
//! Closed, or open with a minimized/maximized pair that can never both be
//! set. Transitions into a visible (non-minimized) open state raise a focus
//! request for the host.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewState {
    Closed,
    Open { minimized: bool, maximized: bool },
}

impl ViewState {
    pub const OPEN: ViewState = ViewState::Open {
        minimized: false,
        maximized: false,
    };

    /// Open state with the maximize rule applied: maximized wins over minimized.
    pub fn open(minimized: bool, maximized: bool) -> Self {
        ViewState::Open {
            minimized: minimized && !maximized,
            maximized,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, ViewState::Open { .. })
    }

    /// Open and showing its content.
    pub fn is_visible(self) -> bool {
        matches!(
            self,
            ViewState::Open {
                minimized: false,
                ..
            }
        )
    }

    pub fn is_maximized(self) -> bool {
        matches!(
            self,
            ViewState::Open {
                maximized: true,
                ..
            }
        )
    }
}

#[derive(Debug, Clone)]
pub struct Viewport {
    state: ViewState,
    focus_pending: bool,
}

impl Viewport {
    pub fn new(state: ViewState) -> Self {
        let mut viewport = Self {
            state: ViewState::Closed,
            focus_pending: false,
        };
        let state = match state {
            ViewState::Open {
                minimized,
                maximized,
            } => ViewState::open(minimized, maximized),
            ViewState::Closed => ViewState::Closed,
        };
        viewport.transition(state);
        viewport
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Close from any state.
    pub fn close(&mut self) -> bool {
        self.transition(ViewState::Closed)
    }

    /// Reopen at normal size. Only valid while closed.
    pub fn reopen(&mut self) -> bool {
        if self.state != ViewState::Closed {
            tracing::debug!("reopen ignored, console already open");
            return false;
        }
        self.transition(ViewState::OPEN)
    }

    /// Flip minimized; minimizing also leaves the maximized size.
    pub fn toggle_minimize(&mut self) -> bool {
        match self.state {
            ViewState::Open {
                minimized,
                maximized,
            } => {
                let minimized = !minimized;
                self.transition(ViewState::Open {
                    minimized,
                    maximized: maximized && !minimized,
                })
            }
            ViewState::Closed => {
                tracing::debug!("minimize ignored, console closed");
                false
            }
        }
    }

    /// Flip maximized; maximizing also restores from minimized.
    pub fn toggle_maximize(&mut self) -> bool {
        match self.state {
            ViewState::Open {
                minimized,
                maximized,
            } => self.transition(ViewState::open(minimized, !maximized)),
            ViewState::Closed => {
                tracing::debug!("maximize ignored, console closed");
                false
            }
        }
    }

    /// Take the pending request to focus the input line.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_pending)
    }

    fn transition(&mut self, next: ViewState) -> bool {
        if next == self.state {
            return false;
        }
        tracing::debug!("viewport {:?} -> {:?}", self.state, next);
        self.state = next;
        if next.is_visible() {
            self.focus_pending = true;
        }
        true
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewState::Closed)
    }
}
