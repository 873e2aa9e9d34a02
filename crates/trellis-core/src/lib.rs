//! # trellis-core
//!
//! Matching and interaction engine behind the `trellis` UI-test DSL.
//!
//! The crate sits between declarative test code and an automation backend.
//! The backend only has to report the accessibility hierarchy and inject
//! touches and keystrokes; everything else (locating elements, waiting for
//! them, asserting on them, scrolling lists) happens here.
//!
//! ## Modules
//!
//! - [`element`] - Accessibility element and frame types
//! - [`driver`] - The [`AutomationDriver`](driver::AutomationDriver) backend trait
//! - [`tree`] - Indexed snapshot used for structural matching
//! - [`matcher`] - Composable [`ViewMatcher`](matcher::ViewMatcher) predicates
//! - [`root`] - Window selection
//! - [`action`] / [`assertion`] - What can be done to, and checked about, a view
//! - [`interaction`] - Deferred handles that resolve, wait and act
//! - [`journal`] - Record of every step performed
//! - [`config`] - Timeouts and gesture tuning
//! - [`logging`] - Tracing subscriber setup
//! - [`mock`] - Scripted in-memory backend for tests
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use trellis_core::action::ViewAction;
//! use trellis_core::element::UIElement;
//! use trellis_core::interaction::ViewInteraction;
//! use trellis_core::matcher::ViewMatcher;
//! use trellis_core::mock::MockDriver;
//!
//! # async fn run() -> Result<(), trellis_core::interaction::InteractionError> {
//! let screen = vec![UIElement::new("Window").with_children(vec![
//!     UIElement::new("Button").with_id("login").with_frame(20.0, 400.0, 350.0, 44.0),
//! ])];
//! let driver = Arc::new(MockDriver::new(screen));
//! ViewInteraction::new(driver, ViewMatcher::WithId("login".into()))
//!     .perform(ViewAction::Click)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod assertion;
pub mod config;
pub mod driver;
pub mod element;
pub mod interaction;
pub mod journal;
pub mod logging;
pub mod matcher;
pub mod mock;
pub mod root;
pub mod tree;
