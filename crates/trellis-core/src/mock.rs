//! In-memory automation backend for testing screen definitions.
//!
//! [`MockDriver`] serves scripted hierarchy snapshots and records every call
//! it receives. Snapshots queued with [`MockDriver::push_tree`] are served
//! one per [`dump_tree`](AutomationDriver::dump_tree) call; once the queue is
//! empty the last snapshot keeps being served. This is enough to model a
//! screen that changes after a tap or a swipe.
//!
//! ```
//! use std::sync::Arc;
//! use trellis_core::element::UIElement;
//! use trellis_core::mock::{DriverCall, MockDriver};
//! use trellis_core::driver::AutomationDriver;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let driver = Arc::new(MockDriver::new(vec![UIElement::new("Window")]));
//! driver.tap_location(10, 20).await.unwrap();
//! assert_eq!(driver.ui_calls(), vec![DriverCall::Tap { x: 10, y: 20 }]);
//! # }
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::driver::{AutomationDriver, DriverError};
use crate::element::UIElement;

/// A call received by [`MockDriver`].
#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    Tap { x: i32, y: i32 },
    DoubleTap { x: i32, y: i32 },
    Swipe {
        start: (i32, i32),
        end: (i32, i32),
        duration: Option<f64>,
    },
    LongPress { x: i32, y: i32, duration: f64 },
    TypeText(String),
    DumpTree,
    Screenshot,
}

impl DriverCall {
    /// Whether this call reads state rather than touching the UI.
    pub fn is_query(&self) -> bool {
        matches!(self, DriverCall::DumpTree | DriverCall::Screenshot)
    }
}

#[derive(Debug, Default)]
struct MockState {
    queued: VecDeque<Vec<UIElement>>,
    current: Vec<UIElement>,
    calls: Vec<DriverCall>,
    fail_next: Option<String>,
    connected: bool,
}

/// Scripted, call-recording [`AutomationDriver`].
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
    screenshot: Vec<u8>,
}

/// Fake PNG header returned by [`MockDriver::screenshot`].
const PNG_HEADER: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];

impl MockDriver {
    /// A connected driver that serves `tree` until told otherwise.
    pub fn new(tree: Vec<UIElement>) -> Self {
        Self {
            state: Mutex::new(MockState {
                current: tree,
                connected: true,
                ..MockState::default()
            }),
            screenshot: PNG_HEADER.to_vec(),
        }
    }

    /// A driver that has not been connected yet.
    pub fn disconnected(tree: Vec<UIElement>) -> Self {
        let driver = Self::new(tree);
        driver.lock().connected = false;
        driver
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a snapshot to be served by a later `dump_tree` call.
    pub fn push_tree(&self, tree: Vec<UIElement>) {
        self.lock().queued.push_back(tree);
    }

    /// Replace the current snapshot and drop anything queued.
    pub fn set_tree(&self, tree: Vec<UIElement>) {
        let mut state = self.lock();
        state.queued.clear();
        state.current = tree;
    }

    /// Make the next UI call (tap, swipe, press or typing) fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.lock().fail_next = Some(message.into());
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<DriverCall> {
        self.lock().calls.clone()
    }

    /// Calls that touched the UI, excluding tree dumps and screenshots.
    pub fn ui_calls(&self) -> Vec<DriverCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| !c.is_query())
            .cloned()
            .collect()
    }

    pub fn dump_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| **c == DriverCall::DumpTree)
            .count()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn ui_call(&self, call: DriverCall) -> Result<(), DriverError> {
        let mut state = self.lock();
        if !state.connected {
            return Err(DriverError::NotConnected);
        }
        state.calls.push(call);
        match state.fail_next.take() {
            Some(message) => Err(DriverError::CommandFailed(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AutomationDriver for MockDriver {
    async fn connect(&mut self) -> Result<(), DriverError> {
        self.lock().connected = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.lock().connected
    }

    async fn tap_location(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.ui_call(DriverCall::Tap { x, y })
    }

    async fn double_tap(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.ui_call(DriverCall::DoubleTap { x, y })
    }

    async fn swipe(
        &self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        duration: Option<f64>,
    ) -> Result<(), DriverError> {
        self.ui_call(DriverCall::Swipe {
            start: (start_x, start_y),
            end: (end_x, end_y),
            duration,
        })
    }

    async fn long_press(&self, x: i32, y: i32, duration: f64) -> Result<(), DriverError> {
        self.ui_call(DriverCall::LongPress { x, y, duration })
    }

    async fn type_text(&self, text: &str) -> Result<(), DriverError> {
        self.ui_call(DriverCall::TypeText(text.to_string()))
    }

    async fn dump_tree(&self) -> Result<Vec<UIElement>, DriverError> {
        let mut state = self.lock();
        if !state.connected {
            return Err(DriverError::NotConnected);
        }
        state.calls.push(DriverCall::DumpTree);
        if let Some(next) = state.queued.pop_front() {
            state.current = next;
        }
        Ok(state.current.clone())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        self.lock().calls.push(DriverCall::Screenshot);
        Ok(self.screenshot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(id: &str) -> Vec<UIElement> {
        vec![UIElement::new("Window").with_id(id)]
    }

    #[tokio::test]
    async fn queued_trees_are_served_in_order_then_stick() {
        let driver = MockDriver::new(window("a"));
        driver.push_tree(window("b"));
        driver.push_tree(window("c"));

        let ids: Vec<_> = [
            driver.dump_tree().await.unwrap(),
            driver.dump_tree().await.unwrap(),
            driver.dump_tree().await.unwrap(),
        ]
        .iter()
        .map(|t| t[0].identifier.clone().unwrap())
        .collect();
        assert_eq!(ids, vec!["b", "c", "c"]);
        assert_eq!(driver.dump_count(), 3);
    }

    #[tokio::test]
    async fn records_ui_calls_separately_from_queries() {
        let driver = MockDriver::new(window("a"));
        driver.dump_tree().await.unwrap();
        driver.type_text("hello").await.unwrap();
        driver.swipe(1, 2, 3, 4, Some(0.3)).await.unwrap();
        assert_eq!(driver.calls().len(), 3);
        assert_eq!(
            driver.ui_calls(),
            vec![
                DriverCall::TypeText("hello".into()),
                DriverCall::Swipe { start: (1, 2), end: (3, 4), duration: Some(0.3) },
            ]
        );
    }

    #[tokio::test]
    async fn fail_next_fails_once() {
        let driver = MockDriver::new(window("a"));
        driver.fail_next("element detached");
        let err = driver.tap_location(1, 1).await.unwrap_err();
        assert!(err.to_string().contains("element detached"));
        assert!(driver.tap_location(1, 1).await.is_ok());
    }

    #[tokio::test]
    async fn disconnected_driver_rejects_calls_until_connected() {
        let mut driver = MockDriver::disconnected(window("a"));
        assert!(!driver.is_connected());
        assert!(matches!(driver.dump_tree().await, Err(DriverError::NotConnected)));
        driver.connect().await.unwrap();
        assert!(driver.dump_tree().await.is_ok());
    }

    #[tokio::test]
    async fn default_double_tap_is_overridden() {
        let driver = MockDriver::new(window("a"));
        driver.double_tap(5, 6).await.unwrap();
        assert_eq!(driver.ui_calls(), vec![DriverCall::DoubleTap { x: 5, y: 6 }]);
    }
}
