//! # trellis
//!
//! Fluent, typed DSL for declarative mobile UI tests.
//!
//! Tests describe views with builder closures and act on them through
//! capability traits. Lookups are deferred: a handle holds a matcher, and
//! the element is resolved (with waiting) only when an action or assertion
//! runs.
//!
//! ```no_run
//! use std::sync::Arc;
//! use trellis::prelude::*;
//! use trellis_core::mock::MockDriver;
//!
//! struct Row {
//!     title: View,
//! }
//!
//! impl ListItem for Row {
//!     fn from_item(item: Item) -> Self {
//!         Self { title: item.view(|b| b.with_id("title")) }
//!     }
//! }
//!
//! # async fn run() -> Result<(), DslError> {
//! let ctx = Trellis::new(Arc::new(MockDriver::new(Vec::new())));
//! ctx.text_field(|b| b.with_id("email")).replace_text("me@example.com").await?;
//! ctx.view(|b| b.with_type("Button").with_label("Log In")).click().await?;
//!
//! let inbox = ctx.list(|b| b.with_id("inbox"), |items| items.register::<Row>());
//! inbox.first_child::<Row>()?.title.assert_text("Welcome").await?;
//! for row in inbox.children::<Row>().await? {
//!     row.title.assert_displayed().await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod assertions;
pub mod builder;
pub mod context;
pub mod error;
pub mod list;
pub mod screen;
pub mod view;

pub use context::Trellis;
pub use error::DslError;

/// Everything a test file usually needs.
pub mod prelude {
    pub use crate::actions::{Actions, Interactable, SwipeActions, TextActions};
    pub use crate::assertions::{Assertions, TextAssertions};
    pub use crate::builder::ViewBuilder;
    pub use crate::context::Trellis;
    pub use crate::error::DslError;
    pub use crate::list::{Item, ItemRegistryBuilder, ListItem, ListView};
    pub use crate::screen::Screen;
    pub use crate::view::{TextField, View};
    pub use trellis_core::action::Direction;
    pub use trellis_core::config::TrellisConfig;
    pub use trellis_core::interaction::InteractionError;
    pub use trellis_core::root::RootMatcher;
}
