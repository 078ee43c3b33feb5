// Copyright (c) 2026 rezky_nightky

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::warn;

use crate::engine::Engine;
use crate::error::EngineError;
use crate::terminal::{PhysicalSize, SizeOracle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeState {
    Stable,
    PendingResize,
}

#[derive(Debug)]
pub enum ResizeOutcome {
    Unchanged,
    Applied(PhysicalSize),
    /// The terminal reports a zero extent; nothing may render until it recovers.
    Deferred(PhysicalSize),
    /// Allocation failed; the old state stays active.
    Abandoned(EngineError),
}

impl ResizeOutcome {
    pub fn skips_frame(&self) -> bool {
        matches!(self, ResizeOutcome::Deferred(_))
    }
}

/// Notify/apply resize protocol. The signal side only sets `notified`; all
/// allocation happens in [`ResizeCoordinator::at_safe_point`].
pub struct ResizeCoordinator {
    notified: Arc<AtomicBool>,
    state: ResizeState,
    last_invalid: Option<PhysicalSize>,
    last_failed: Option<PhysicalSize>,
}

impl Default for ResizeCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResizeCoordinator {
    pub fn new() -> Self {
        Self {
            notified: Arc::new(AtomicBool::new(false)),
            state: ResizeState::Stable,
            last_invalid: None,
            last_failed: None,
        }
    }

    /// Flag for the asynchronous resize notification.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.notified)
    }

    #[cfg(test)]
    pub fn state(&self) -> ResizeState {
        self.state
    }

    /// Polls the oracle, folds in any notification, and applies a pending resize.
    pub fn at_safe_point<O: SizeOracle>(&mut self, oracle: &O, engine: &mut Engine) -> ResizeOutcome {
        let observed = oracle.physical_size();

        // Any physical change counts: a parity flip keeps the logical grid but
        // moves the last physical column the renderer must not pad past. A size
        // that already failed to allocate is only retried on a fresh
        // notification, not on every poll.
        let polled_change =
            observed != engine.physical_size() && self.last_failed != Some(observed);
        if self.notified.swap(false, Ordering::AcqRel) || polled_change {
            self.state = ResizeState::PendingResize;
        }

        if self.state == ResizeState::Stable {
            return ResizeOutcome::Unchanged;
        }

        if !observed.is_valid() {
            if self.last_invalid != Some(observed) {
                warn!(
                    "terminal reports {}x{}, waiting for a usable size",
                    observed.cols, observed.rows
                );
                self.last_invalid = Some(observed);
            }
            return ResizeOutcome::Deferred(observed);
        }
        self.last_invalid = None;

        self.state = ResizeState::Stable;
        match engine.resize(observed) {
            Ok(()) => {
                self.last_failed = None;
                ResizeOutcome::Applied(observed)
            }
            Err(e) => {
                self.last_failed = Some(observed);
                warn!(
                    "resize to {}x{} abandoned: {}",
                    observed.cols, observed.rows, e
                );
                ResizeOutcome::Abandoned(e)
            }
        }
    }
}
