//! Confirmation state machine for quitting with unsaved changes.
//!
//! A guard armed with threshold `N` lets a clean buffer quit immediately; a
//! dirty buffer needs `N` consecutive quit presses, the `N`-th one exits. Any
//! other key must call [`QuitGuard::reset`].

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitDecision {
    Quit,
    /// Still guarded; `remaining` more presses are needed.
    Warn { remaining: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitGuard {
    threshold: u32,
    remaining: u32,
}

impl Default for QuitGuard {
    fn default() -> Self {
        Self::new(DEFAULT_QUIT_TIMES)
    }
}

pub const DEFAULT_QUIT_TIMES: u32 = 3;

impl QuitGuard {
    pub fn new(threshold: u32) -> Self {
        let threshold = threshold.max(1);
        Self {
            threshold,
            remaining: threshold,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Register a quit press.
    pub fn press(&mut self, dirty: bool) -> QuitDecision {
        if !dirty {
            return QuitDecision::Quit;
        }
        self.remaining = self.remaining.saturating_sub(1);
        debug!(target: "runtime", remaining = self.remaining, "quit_guarded");
        if self.remaining == 0 {
            QuitDecision::Quit
        } else {
            QuitDecision::Warn {
                remaining: self.remaining,
            }
        }
    }

    pub fn reset(&mut self) {
        self.remaining = self.threshold;
    }
}
