//! Walkthrough session state.
//!
//! The scenario list is fixed at startup; the only mutable state is the
//! cursor, guarded by a single update lock so concurrent submissions cannot
//! tear the read-then-increment.

use std::sync::Mutex;

use crate::parser::ScenarioRecord;

/// Ordered scenario list plus the cursor of the single operator session.
///
/// The cursor is monotonically non-decreasing; `cursor == len` is the
/// terminal "all processed" state.
#[derive(Debug)]
pub struct WalkthroughSession {
    scenarios: Vec<ScenarioRecord>,
    cursor: Mutex<usize>,
}

impl WalkthroughSession {
    pub fn new(scenarios: Vec<ScenarioRecord>) -> Self {
        Self {
            scenarios,
            cursor: Mutex::new(0),
        }
    }

    /// Number of scenarios in this run.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Current cursor position, `0..=len`.
    pub fn position(&self) -> usize {
        *self.cursor.lock().unwrap()
    }

    /// The scenario the operator should execute next, if any remain.
    pub fn current(&self) -> Option<ScenarioRecord> {
        self.scenarios.get(self.position()).cloned()
    }

    /// Whether every scenario has been processed.
    pub fn is_complete(&self) -> bool {
        self.position() >= self.scenarios.len()
    }

    /// Move past the current scenario. Clamped at `len`; returns the new
    /// cursor position.
    pub fn advance(&self) -> usize {
        let mut cursor = self.cursor.lock().unwrap();
        *cursor = (*cursor + 1).min(self.scenarios.len());
        *cursor
    }
}
