//! Actions that can be performed on a matched view.
//!
//! Actions are plain data. [`ViewInteraction::perform`](crate::interaction::ViewInteraction::perform)
//! turns them into driver gestures once the target element has been located.
//!
//! - **Touch**: [`ViewAction::Click`], [`ViewAction::DoubleClick`], [`ViewAction::LongClick`]
//! - **Text**: [`ViewAction::TypeText`], [`ViewAction::ReplaceText`], [`ViewAction::ClearText`]
//! - **Movement**: [`ViewAction::Swipe`], [`ViewAction::ScrollTo`], [`ViewAction::SwipeUntilSettled`]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Direction of a swipe gesture, named after the finger movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Start and end points as fractions of a frame: `((sx, sy), (ex, ey))`.
    pub fn span(self) -> ((f64, f64), (f64, f64)) {
        match self {
            Direction::Up => ((0.5, 0.8), (0.5, 0.2)),
            Direction::Down => ((0.5, 0.2), (0.5, 0.8)),
            Direction::Left => ((0.8, 0.5), (0.2, 0.5)),
            Direction::Right => ((0.2, 0.5), (0.8, 0.5)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!(
                "Invalid swipe direction '{}'. Use: up, down, left, right",
                s
            )),
        }
    }
}

/// An action performed on a single matched element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewAction {
    /// Tap the centre of the element.
    Click,

    /// Tap the centre of the element twice.
    DoubleClick,

    /// Press and hold the centre of the element.
    LongClick,

    /// Focus the element and type text after its current contents.
    TypeText { text: String },

    /// Focus the element, clear it, then type text.
    ReplaceText { text: String },

    /// Focus the element and delete its current contents.
    ClearText,

    /// Swipe across the element.
    Swipe { direction: Direction },

    /// Scroll the element's container until the element is fully visible.
    ScrollTo,

    /// Swipe across a scrollable element until its contents stop changing.
    SwipeUntilSettled { direction: Direction },
}

impl ViewAction {
    /// Returns a short, static name for this action suitable for use in
    /// tracing span metadata and the step journal.
    pub fn name(&self) -> &'static str {
        match self {
            ViewAction::Click => "click",
            ViewAction::DoubleClick => "double_click",
            ViewAction::LongClick => "long_click",
            ViewAction::TypeText { .. } => "type_text",
            ViewAction::ReplaceText { .. } => "replace_text",
            ViewAction::ClearText => "clear_text",
            ViewAction::Swipe { .. } => "swipe",
            ViewAction::ScrollTo => "scroll_to",
            ViewAction::SwipeUntilSettled { .. } => "swipe_until_settled",
        }
    }
}

impl fmt::Display for ViewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewAction::TypeText { text } => write!(f, "type text '{}'", text),
            ViewAction::ReplaceText { text } => write!(f, "replace text with '{}'", text),
            ViewAction::Swipe { direction } => write!(f, "swipe {}", direction),
            ViewAction::SwipeUntilSettled { direction } => {
                write!(f, "swipe {} until settled", direction)
            }
            other => f.write_str(&other.name().replace('_', " ")),
        }
    }
}
