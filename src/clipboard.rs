//! Clipboard writes with a transient "copied" acknowledgment.
//!
//! Each copy affordance (keyed by catalog position) owns a [`CopyState`]. A
//! successful write flips it to copied and schedules a reset
//! [`COPY_ACK_WINDOW`] later. Copying again on the same affordance cancels the
//! pending reset before scheduling a new one, so an old reset can never clear
//! a newer acknowledgment.
//!
//! Time is passed in explicitly; the event loop calls [`CopyController::tick`]
//! and wakes up at [`CopyController::next_deadline`].

use std::collections::HashMap;
use std::time::{Duration, Instant};

use thiserror::Error;

/// How long the "copied" acknowledgment stays visible.
pub const COPY_ACK_WINDOW: Duration = Duration::from_millis(500);

/// Failure to write to the clipboard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CopyError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write rejected: {0}")]
    Rejected(String),
}

/// Platform clipboard service.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), CopyError>;
}

/// System clipboard backed by `arboard`.
///
/// The handle is opened on first use and kept alive afterwards; on X11 the
/// clipboard contents are only served while it exists.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), CopyError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| CopyError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }

        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text)
                .map_err(|e| CopyError::Rejected(e.to_string())),
            None => Err(CopyError::Unavailable("no clipboard handle".to_string())),
        }
    }
}

/// Scheduled reset of one copy acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetHandle {
    deadline: Instant,
}

impl ResetHandle {
    fn schedule(now: Instant) -> Self {
        Self {
            deadline: now + COPY_ACK_WINDOW,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// Acknowledgment state of a single copy affordance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyState {
    is_copied: bool,
    pending_reset: Option<ResetHandle>,
}

impl CopyState {
    pub fn is_copied(&self) -> bool {
        self.is_copied
    }

    pub fn pending_reset(&self) -> Option<ResetHandle> {
        self.pending_reset
    }

    /// Write `text` and, on success, acknowledge it until `now + COPY_ACK_WINDOW`.
    ///
    /// A failed write leaves the state untouched.
    pub fn copy(
        &mut self,
        clipboard: &mut dyn Clipboard,
        text: &str,
        now: Instant,
    ) -> Result<(), CopyError> {
        clipboard.write_text(text)?;
        self.cancel_reset();
        self.is_copied = true;
        self.pending_reset = Some(ResetHandle::schedule(now));
        Ok(())
    }

    /// Drop the pending reset, if any.
    pub fn cancel_reset(&mut self) -> Option<ResetHandle> {
        self.pending_reset.take()
    }

    /// Fire the pending reset if it is due. Returns true when state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending_reset {
            Some(handle) if now >= handle.deadline => {
                self.pending_reset = None;
                self.is_copied = false;
                true
            }
            _ => false,
        }
    }
}

/// Copy acknowledgments for every affordance, plus the clipboard they write to.
pub struct CopyController {
    clipboard: Box<dyn Clipboard>,
    states: HashMap<usize, CopyState>,
}

impl CopyController {
    pub fn new(clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            clipboard,
            states: HashMap::new(),
        }
    }

    /// Copy `text` on behalf of affordance `key`.
    pub fn copy(&mut self, key: usize, text: &str, now: Instant) -> Result<(), CopyError> {
        let state = self.states.entry(key).or_default();
        let result = state.copy(self.clipboard.as_mut(), text, now);
        match &result {
            Ok(()) => log::info!("Copied {:?} to clipboard", text),
            Err(e) => log::warn!("Copy of {:?} failed: {}", text, e),
        }
        result
    }

    pub fn is_copied(&self, key: usize) -> bool {
        self.states.get(&key).is_some_and(CopyState::is_copied)
    }

    pub fn state(&self, key: usize) -> Option<&CopyState> {
        self.states.get(&key)
    }

    /// Fire all due resets. Returns true when any acknowledgment changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for state in self.states.values_mut() {
            changed |= state.tick(now);
        }
        // Idle states carry nothing worth keeping
        self.states
            .retain(|_, s| s.is_copied() || s.pending_reset().is_some());
        changed
    }

    /// Earliest pending reset across all affordances.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.states
            .values()
            .filter_map(|s| s.pending_reset().map(|h| h.deadline()))
            .min()
    }

    /// Forget every acknowledgment (used when the catalog is replaced).
    pub fn clear(&mut self) {
        self.states.clear();
    }
}
