//! Handles for single views.

use trellis_core::element::UIElement;
use trellis_core::interaction::{InteractionError, ViewInteraction};
use trellis_core::root::RootMatcher;

use crate::actions::{Actions, Interactable, SwipeActions, TextActions};
use crate::assertions::{Assertions, TextAssertions};
use crate::builder::ViewBuilder;

/// A deferred reference to one element on screen.
///
/// Creating a `View` never touches the driver; the element is looked up
/// each time an action or assertion runs.
#[derive(Debug, Clone)]
pub struct View {
    interaction: ViewInteraction,
}

impl View {
    pub fn new(interaction: ViewInteraction) -> Self {
        Self { interaction }
    }

    pub fn in_root(self, root: RootMatcher) -> Self {
        Self::new(self.interaction.in_root(root))
    }

    /// A view nested anywhere inside this one.
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

    /// Waits for the element and returns a snapshot of it.
    pub async fn element(&self) -> Result<UIElement, InteractionError> {
        self.interaction.element().await
    }

    /// Label, falling back to value.
    pub async fn text(&self) -> Result<Option<String>, InteractionError> {
        Ok(self.element().await?.text().map(str::to_string))
    }
}

impl Interactable for View {
    fn interaction(&self) -> &ViewInteraction {
        &self.interaction
    }
}

impl Actions for View {}
impl SwipeActions for View {}
impl Assertions for View {}
impl TextAssertions for View {}

/// A view that also accepts keyboard input.
#[derive(Debug, Clone)]
pub struct TextField {
    interaction: ViewInteraction,
}

impl TextField {
    pub fn new(interaction: ViewInteraction) -> Self {
        Self { interaction }
    }

    pub fn in_root(self, root: RootMatcher) -> Self {
        Self::new(self.interaction.in_root(root))
    }

    pub async fn element(&self) -> Result<UIElement, InteractionError> {
        self.interaction.element().await
    }

    /// Current contents of the field.
    pub async fn value(&self) -> Result<Option<String>, InteractionError> {
        Ok(self.element().await?.value)
    }
}

impl Interactable for TextField {
    fn interaction(&self) -> &ViewInteraction {
        &self.interaction
    }
}

impl Actions for TextField {}
impl TextActions for TextField {}
impl SwipeActions for TextField {}
impl Assertions for TextField {}
impl TextAssertions for TextField {}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use trellis_core::matcher::ViewMatcher;
    use trellis_core::mock::MockDriver;

    use super::*;

    fn screen() -> Vec<UIElement> {
        vec![UIElement::new("Window")
            .with_frame(0.0, 0.0, 390.0, 844.0)
            .with_children(vec![UIElement::new("Other")
                .with_id("card")
                .with_frame(0.0, 0.0, 390.0, 200.0)
                .with_children(vec![UIElement::new("StaticText")
                    .with_id("title")
                    .with_label("Welcome")
                    .with_frame(10.0, 10.0, 200.0, 20.0)])])]
    }

    #[test]
    fn nested_view_is_scoped_to_parent() {
        let driver = Arc::new(MockDriver::new(screen()));
        let card = View::new(ViewInteraction::new(driver, ViewMatcher::WithId("card".into())));
        let title = card.view(|b| b.with_id("title"));
        assert_eq!(
            title.interaction().matcher().to_string(),
            "(with id 'title' and is descendant of (with id 'card'))"
        );
    }

    #[test]
    fn in_root_replaces_root() {
        let driver = Arc::new(MockDriver::new(screen()));
        let view = View::new(ViewInteraction::new(driver, ViewMatcher::WithId("card".into())))
            .in_root(RootMatcher::Topmost);
        assert_eq!(view.interaction().root(), &RootMatcher::Topmost);
    }

    #[tokio::test]
    async fn text_reads_label() {
        let driver = Arc::new(MockDriver::new(screen()));
        let title = View::new(ViewInteraction::new(driver, ViewMatcher::WithId("title".into())));
        assert_eq!(title.text().await.unwrap().as_deref(), Some("Welcome"));
    }
}
