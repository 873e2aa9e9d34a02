//! Lists and their typed items.
//!
//! A [`ListView`] wraps a scrollable container whose direct children are
//! rows. Rows are exposed as user-defined types: each type is registered
//! once with a factory that turns a positional [`Item`] handle into the
//! typed wrapper.
//!
//! ```
//! use std::sync::Arc;
//! use trellis::prelude::*;
//! use trellis_core::mock::MockDriver;
//!
//! struct InboxRow {
//!     title: View,
//! }
//!
//! impl ListItem for InboxRow {
//!     fn from_item(item: Item) -> Self {
//!         Self { title: item.view(|b| b.with_id("title")) }
//!     }
//! }
//!
//! let trellis = Trellis::new(Arc::new(MockDriver::new(Vec::new())));
//! let inbox = trellis.list(|b| b.with_id("inbox"), |items| items.register::<InboxRow>());
//! let row: InboxRow = inbox.child_at(3).unwrap();
//! assert_eq!(
//!     row.title.interaction().matcher().to_string(),
//!     "(with id 'title' and is descendant of (child 3 of (with id 'inbox')))"
//! );
//! ```

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};
use trellis_core::action::{Direction, ViewAction};
use trellis_core::assertion::ViewAssertion;
use trellis_core::interaction::{InteractionError, ViewInteraction};
use trellis_core::matcher::ViewMatcher;
use trellis_core::root::RootMatcher;

use crate::actions::{Actions, Interactable, SwipeActions};
use crate::assertions::{Assertions, TextAssertions};
use crate::builder::ViewBuilder;
use crate::error::DslError;
use crate::view::{TextField, View};

type Factory = Box<dyn Fn(Item) -> Box<dyn Any + Send> + Send + Sync>;

struct Registration {
    type_name: &'static str,
    factory: Factory,
}

/// A row type that knows how to wrap itself around an [`Item`].
pub trait ListItem: Send + Sized + 'static {
    fn from_item(item: Item) -> Self;
}

/// Collects item factories before a list is created.
#[derive(Default)]
pub struct ItemRegistryBuilder {
    entries: HashMap<TypeId, Registration>,
}

impl ItemRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` for rows of type `T`.
    ///
    /// Registering the same type twice keeps the later factory.
    pub fn item<T, F>(mut self, factory: F) -> Self
    where
        T: Send + 'static,
        F: Fn(Item) -> T + Send + Sync + 'static,
    {
        let registration = Registration {
            type_name: type_name::<T>(),
            factory: Box::new(move |item| -> Box<dyn Any + Send> { Box::new(factory(item)) }),
        };
        if self.entries.insert(TypeId::of::<T>(), registration).is_some() {
            warn!(item = type_name::<T>(), "item type registered twice, keeping the last factory");
        }
        self
    }

    /// Registers a [`ListItem`] through its own constructor.
    pub fn register<T: ListItem>(self) -> Self {
        self.item(T::from_item)
    }

    pub fn build(self) -> ItemRegistry {
        ItemRegistry {
            entries: self.entries,
        }
    }
}

/// Read-only map from row type to factory.
pub struct ItemRegistry {
    entries: HashMap<TypeId, Registration>,
}

impl ItemRegistry {
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wraps `item` as a `T`, or `None` if `T` has no factory.
    pub fn create<T: 'static>(&self, item: Item) -> Option<T> {
        let registration = self.entries.get(&TypeId::of::<T>())?;
        (registration.factory)(item).downcast::<T>().ok().map(|boxed| *boxed)
    }
}

impl std::fmt::Debug for ItemRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.entries.values().map(|r| r.type_name).collect();
        names.sort_unstable();
        f.debug_struct("ItemRegistry").field("types", &names).finish()
    }
}

/// One row of a list, addressed by position or by a matcher.
#[derive(Debug, Clone)]
pub struct Item {
    interaction: ViewInteraction,
    position: Option<usize>,
}

impl Item {
    fn new(interaction: ViewInteraction, position: Option<usize>) -> Self {
        Self {
            interaction,
            position,
        }
    }

    /// Position in the list, if the row was fetched by position.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn view<F>(&self, f: F) -> View
    where
        F: FnOnce(ViewBuilder) -> ViewBuilder,
    {
        View::new(self.interaction.descendant(ViewBuilder::from_fn(f)))
    }

    pub fn text_field<F>(&self, f: F) -> TextField
    where
        F: FnOnce(ViewBuilder) -> ViewBuilder,
    {
        TextField::new(self.interaction.descendant(ViewBuilder::from_fn(f)))
    }
}

impl Interactable for Item {
    fn interaction(&self) -> &ViewInteraction {
        &self.interaction
    }
}

impl Actions for Item {}
impl SwipeActions for Item {}
impl Assertions for Item {}
impl TextAssertions for Item {}

/// A list whose rows are read through registered item types.
#[derive(Debug, Clone)]
pub struct ListView {
    interaction: ViewInteraction,
    registry: Arc<ItemRegistry>,
}

impl ListView {
    pub fn new<R>(interaction: ViewInteraction, items: R) -> Self
    where
        R: FnOnce(ItemRegistryBuilder) -> ItemRegistryBuilder,
    {
        Self {
            interaction,
            registry: Arc::new(items(ItemRegistryBuilder::new()).build()),
        }
    }

    pub fn in_root(self, root: RootMatcher) -> Self {
        Self {
            interaction: self.interaction.in_root(root),
            registry: self.registry,
        }
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    fn not_registered<T>(&self) -> DslError {
        DslError::NotRegistered {
            type_name: type_name::<T>(),
            list: self.interaction.matcher().to_string(),
        }
    }

    fn ensure_registered<T: 'static>(&self) -> Result<(), DslError> {
        if self.registry.contains::<T>() {
            Ok(())
        } else {
            Err(self.not_registered::<T>())
        }
    }

    fn wrap<T: 'static>(&self, matcher: ViewMatcher, position: Option<usize>) -> Result<T, DslError> {
        let item = Item::new(self.interaction.derive(matcher), position);
        self.registry
            .create::<T>(item)
            .ok_or_else(|| self.not_registered::<T>())
    }

    /// Number of rows currently in the list.
    pub async fn size(&self) -> Result<usize, InteractionError> {
        self.interaction.child_count().await
    }

    /// The row at `position`. Does not touch the driver.
    pub fn child_at<T: 'static>(&self, position: usize) -> Result<T, DslError> {
        let matcher = ViewMatcher::child_at(self.interaction.matcher().clone(), position);
        self.wrap(matcher, Some(position))
    }

    pub fn first_child<T: 'static>(&self) -> Result<T, DslError> {
        self.child_at(0)
    }

    /// The row at `size - 1`. Fails with `EmptyList` on an empty list.
    pub async fn last_child<T: 'static>(&self) -> Result<T, DslError> {
        self.ensure_registered::<T>()?;
        let position = self.interaction.last_child_position().await?;
        self.child_at(position)
    }

    /// The first row satisfying the matcher, wherever it is.
    pub fn child_with<T, F>(&self, f: F) -> Result<T, DslError>
    where
        T: 'static,
        F: FnOnce(ViewBuilder) -> ViewBuilder,
    {
        let matcher =
            ViewMatcher::child_matching(self.interaction.matcher().clone(), ViewBuilder::from_fn(f));
        self.wrap(matcher, None)
    }

    /// Every row, in order.
    pub async fn children<T: 'static>(&self) -> Result<Vec<T>, DslError> {
        self.ensure_registered::<T>()?;
        let size = self.size().await?;
        debug!(size, item = type_name::<T>(), "collecting list children");
        (0..size).map(|position| self.child_at(position)).collect()
    }

    /// Runs `f` on every row in order, stopping at the first error.
    pub async fn for_each_child<T, F, Fut>(&self, mut f: F) -> Result<(), DslError>
    where
        T: 'static,
        F: FnMut(usize, T) -> Fut,
        Fut: Future<Output = Result<(), DslError>>,
    {
        for (position, item) in self.children::<T>().await?.into_iter().enumerate() {
            f(position, item).await?;
        }
        Ok(())
    }

    pub async fn scroll_to_start(&self) -> Result<(), InteractionError> {
        self.interaction
            .perform(ViewAction::SwipeUntilSettled { direction: Direction::Down })
            .await
    }

    pub async fn scroll_to_end(&self) -> Result<(), InteractionError> {
        self.interaction
            .perform(ViewAction::SwipeUntilSettled { direction: Direction::Up })
            .await
    }

    /// Scrolls until the row at `position` is fully visible in the list.
    pub async fn scroll_to_position(&self, position: usize) -> Result<(), InteractionError> {
        let matcher = ViewMatcher::child_at(self.interaction.matcher().clone(), position);
        self.interaction.derive(matcher).perform(ViewAction::ScrollTo).await
    }

    pub async fn assert_size(&self, size: usize) -> Result<(), InteractionError> {
        self.interaction.check(ViewAssertion::HasChildCount(size)).await
    }

    pub async fn assert_empty(&self) -> Result<(), InteractionError> {
        self.assert_size(0).await
    }
}

impl Interactable for ListView {
    fn interaction(&self) -> &ViewInteraction {
        &self.interaction
    }
}

impl Actions for ListView {}
impl SwipeActions for ListView {}
impl Assertions for ListView {}
