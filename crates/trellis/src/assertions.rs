//! Assertion capabilities shared by view handles.
//!
//! Every assertion retries until it holds or the configured timeout
//! elapses, so `assert_does_not_exist` after a click waits for the screen
//! to change instead of failing on the first snapshot.

use async_trait::async_trait;
use trellis_core::assertion::ViewAssertion;
use trellis_core::interaction::InteractionError;

use crate::actions::Interactable;
use crate::builder::ViewBuilder;

#[async_trait]
pub trait Assertions: Interactable + Sync {
    async fn assert_displayed(&self) -> Result<(), InteractionError> {
        self.interaction().check(ViewAssertion::IsDisplayed).await
    }

    async fn assert_not_displayed(&self) -> Result<(), InteractionError> {
        self.interaction().check(ViewAssertion::IsNotDisplayed).await
    }

    async fn assert_exists(&self) -> Result<(), InteractionError> {
        self.interaction().check(ViewAssertion::Exists).await
    }

    async fn assert_does_not_exist(&self) -> Result<(), InteractionError> {
        self.interaction().check(ViewAssertion::DoesNotExist).await
    }

    async fn assert_enabled(&self) -> Result<(), InteractionError> {
        self.interaction().check(ViewAssertion::IsEnabled).await
    }

    async fn assert_disabled(&self) -> Result<(), InteractionError> {
        self.interaction().check(ViewAssertion::IsDisabled).await
    }

    async fn assert_selected(&self) -> Result<(), InteractionError> {
        self.interaction().check(ViewAssertion::IsSelected).await
    }

    async fn assert_not_selected(&self) -> Result<(), InteractionError> {
        self.interaction().check(ViewAssertion::IsNotSelected).await
    }

    async fn assert_focused(&self) -> Result<(), InteractionError> {
        self.interaction().check(ViewAssertion::IsFocused).await
    }

    /// Asserts the view satisfies an ad-hoc matcher.
    async fn assert_matches<F>(&self, f: F) -> Result<(), InteractionError>
    where
        F: FnOnce(ViewBuilder) -> ViewBuilder + Send,
    {
        let matcher = ViewBuilder::from_fn(f);
        self.interaction().check(ViewAssertion::Matches(matcher)).await
    }
}

#[async_trait]
pub trait TextAssertions: Interactable + Sync {
    /// Label or value matches `text` (`*` and `?` are wildcards).
    async fn assert_text(&self, text: &str) -> Result<(), InteractionError> {
        self.interaction()
            .check(ViewAssertion::HasText(text.to_string()))
            .await
    }

    async fn assert_contains_text(&self, text: &str) -> Result<(), InteractionError> {
        self.interaction()
            .check(ViewAssertion::ContainsText(text.to_string()))
            .await
    }

    async fn assert_value(&self, value: &str) -> Result<(), InteractionError> {
        self.interaction()
            .check(ViewAssertion::HasValue(value.to_string()))
            .await
    }
}
