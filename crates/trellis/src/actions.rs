//! Action capabilities shared by view handles.
//!
//! Each handle type opts into the capabilities that make sense for it: a
//! plain [`View`](crate::view::View) can be clicked and swiped, only a
//! [`TextField`](crate::view::TextField) takes keyboard input.

use async_trait::async_trait;
use trellis_core::action::{Direction, ViewAction};
use trellis_core::interaction::{InteractionError, ViewInteraction};

/// Anything backed by a [`ViewInteraction`].
pub trait Interactable {
    fn interaction(&self) -> &ViewInteraction;
}

#[async_trait]
pub trait Actions: Interactable + Sync {
    async fn click(&self) -> Result<(), InteractionError> {
        self.interaction().perform(ViewAction::Click).await
    }

    async fn double_click(&self) -> Result<(), InteractionError> {
        self.interaction().perform(ViewAction::DoubleClick).await
    }

    async fn long_click(&self) -> Result<(), InteractionError> {
        self.interaction().perform(ViewAction::LongClick).await
    }

    /// Scrolls until the view is fully visible in its container.
    async fn scroll_to(&self) -> Result<(), InteractionError> {
        self.interaction().perform(ViewAction::ScrollTo).await
    }
}

#[async_trait]
pub trait TextActions: Interactable + Sync {
    async fn type_text(&self, text: &str) -> Result<(), InteractionError> {
        self.interaction()
            .perform(ViewAction::TypeText { text: text.to_string() })
            .await
    }

    async fn replace_text(&self, text: &str) -> Result<(), InteractionError> {
        self.interaction()
            .perform(ViewAction::ReplaceText { text: text.to_string() })
            .await
    }

    async fn clear_text(&self) -> Result<(), InteractionError> {
        self.interaction().perform(ViewAction::ClearText).await
    }
}

#[async_trait]
pub trait SwipeActions: Interactable + Sync {
    async fn swipe(&self, direction: Direction) -> Result<(), InteractionError> {
        self.interaction().perform(ViewAction::Swipe { direction }).await
    }

    async fn swipe_up(&self) -> Result<(), InteractionError> {
        self.swipe(Direction::Up).await
    }

    async fn swipe_down(&self) -> Result<(), InteractionError> {
        self.swipe(Direction::Down).await
    }

    async fn swipe_left(&self) -> Result<(), InteractionError> {
        self.swipe(Direction::Left).await
    }

    async fn swipe_right(&self) -> Result<(), InteractionError> {
        self.swipe(Direction::Right).await
    }
}
