//! Step journal for test runs.
//!
//! Every action and assertion performed through a
//! [`ViewInteraction`](crate::interaction::ViewInteraction) is appended to
//! the interaction's [`Journal`]. Handles created from the same context
//! share one journal, so a failing test can dump the steps that led up to
//! the failure.
//!
//! ```
//! use trellis_core::journal::{Journal, Step, StepLog, StepResult};
//!
//! let journal = Journal::new();
//! journal.record(StepLog::new(
//!     Step::Action { name: "click".into() },
//!     "with id 'login'".into(),
//!     StepResult::Success,
//!     Some(12),
//! ));
//! assert_eq!(journal.len(), 1);
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The outcome of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepResult {
    Success,
    /// The step failed with the given error message.
    Failure(String),
}

/// What kind of step was run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Action { name: String },
    Assertion { name: String },
}

/// A logged step with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepLog {
    /// Unique identifier for this log entry.
    pub id: Uuid,

    /// When the step finished.
    pub timestamp: DateTime<Utc>,

    pub step: Step,

    /// Description of the matcher the step targeted.
    pub matcher: String,

    pub result: StepResult,

    /// How long the step took, including waiting, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Screenshot captured after a failure (base64-encoded PNG).
    ///
    /// Wrapped in `Arc` so cloning the journal stays cheap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<Arc<String>>,
}

impl StepLog {
    /// Creates a new entry with a fresh UUID and the current time.
    pub fn new(step: Step, matcher: String, result: StepResult, duration_ms: Option<u64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            step,
            matcher,
            result,
            duration_ms,
            screenshot: None,
        }
    }

    pub fn with_screenshot(mut self, screenshot: String) -> Self {
        self.screenshot = Some(Arc::new(screenshot));
        self
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.result, StepResult::Failure(_))
    }
}

/// Shared, append-only list of steps.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<StepLog>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: StepLog) {
        // A poisoned lock only means a panicking test; keep recording.
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.push(entry);
    }

    /// A copy of every entry, oldest first.
    pub fn entries(&self) -> Vec<StepLog> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn failures(&self) -> Vec<StepLog> {
        self.entries().into_iter().filter(StepLog::is_failure).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Serializes every entry as a pretty-printed JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(result: StepResult) -> StepLog {
        StepLog::new(
            Step::Action { name: "click".into() },
            "with id 'ok'".into(),
            result,
            Some(5),
        )
    }

    #[test]
    fn clones_share_entries() {
        let journal = Journal::new();
        let other = journal.clone();
        other.record(click(StepResult::Success));
        assert_eq!(journal.len(), 1);
        journal.clear();
        assert!(other.is_empty());
    }

    #[test]
    fn failures_are_filtered() {
        let journal = Journal::new();
        journal.record(click(StepResult::Success));
        journal.record(click(StepResult::Failure("gone".into())));
        let failures = journal.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].result, StepResult::Failure("gone".into()));
    }

    #[test]
    fn json_omits_empty_fields() {
        let journal = Journal::new();
        journal.record(click(StepResult::Success));
        let json = journal.to_json().unwrap();
        assert!(json.contains(r#""kind": "action""#));
        assert!(!json.contains("screenshot"));

        let entry = click(StepResult::Failure("x".into())).with_screenshot("iVBOR".into());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("iVBOR"));
    }

    #[test]
    fn entries_have_unique_ids() {
        let a = click(StepResult::Success);
        let b = click(StepResult::Success);
        assert_ne!(a.id, b.id);
    }
}
