//! Backend seam.
//!
//! [`AutomationDriver`] is the seam between the
//! DSL and whatever actually talks to the application under test (an
//! on-device agent, an emulator bridge, or [`MockDriver`](crate::mock::MockDriver)
//! in tests). The driver only knows about coordinates, text input and the
//! accessibility tree. Matching, waiting and assertions are done on this side
//! of the seam by [`ViewInteraction`](crate::interaction::ViewInteraction).

use async_trait::async_trait;
use thiserror::Error;

use crate::element::UIElement;

/// Failures reported by an automation backend.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The backend rejected or could not complete a command.
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Not connected to automation backend")]
    NotConnected,

    /// The backend did not answer in time.
    #[error("Operation timed out")]
    Timeout,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend sent a hierarchy or reply that could not be decoded.
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

/// Device-side operations the DSL needs from a backend.
///
/// Coordinates are screen points. Only [`double_tap`](AutomationDriver::double_tap)
/// has a default; every other method must be provided.
///
/// Call [`connect`](AutomationDriver::connect) before sharing the driver
/// behind an `Arc`. Interactions check [`is_connected`](AutomationDriver::is_connected)
/// before every snapshot and fail with [`DriverError::NotConnected`] otherwise.
#[async_trait]
pub trait AutomationDriver: Send + Sync {
    async fn connect(&mut self) -> Result<(), DriverError>;

    fn is_connected(&self) -> bool;

    async fn tap_location(&self, x: i32, y: i32) -> Result<(), DriverError>;

    /// Two consecutive taps unless the backend has a native gesture.
    async fn double_tap(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.tap_location(x, y).await?;
        self.tap_location(x, y).await
    }

    /// Drags from `(start_x, start_y)` to `(end_x, end_y)`, optionally over
    /// `duration` seconds.
    async fn swipe(
        &self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        duration: Option<f64>,
    ) -> Result<(), DriverError>;

    /// Presses and holds for `duration` seconds.
    async fn long_press(&self, x: i32, y: i32, duration: f64) -> Result<(), DriverError>;

    /// Sends keystrokes to whichever element has focus.
    async fn type_text(&self, text: &str) -> Result<(), DriverError>;

    /// One root element per window, back to front: the last root is the
    /// topmost window.
    async fn dump_tree(&self) -> Result<Vec<UIElement>, DriverError>;

    /// PNG bytes of the current screen.
    async fn screenshot(&self) -> Result<Vec<u8>, DriverError>;
}
