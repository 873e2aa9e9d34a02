//! Accessibility element types shared by every automation backend.
//!
//! A backend reports the screen as a forest of [`UIElement`] trees, one per
//! window. Matchers, assertions and interactions all work on these values and
//! never on backend-specific structures.
//!
//! The builder-style helpers (`with_id`, `with_label`, ...) exist mostly for
//! hand-written hierarchies in tests and for [`MockDriver`](crate::mock::MockDriver).

use serde::{Deserialize, Serialize};

/// A UI element from the accessibility hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UIElement {
    /// Stable identifier set by the app developer.
    #[serde(rename = "AXUniqueId", default)]
    pub identifier: Option<String>,

    /// Text read out by assistive technology, usually what is on screen.
    #[serde(rename = "AXLabel", default)]
    pub label: Option<String>,

    /// Current contents, e.g. of a text field or switch.
    #[serde(rename = "AXValue", default)]
    pub value: Option<String>,

    /// Widget kind such as `Button`, `TextField` or `Cell`.
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,

    #[serde(default)]
    pub frame: Option<ElementFrame>,

    /// Child elements in on-screen order.
    #[serde(default)]
    pub children: Vec<UIElement>,

    #[serde(default)]
    pub role: Option<String>,

    /// Whether the element can receive touches. `None` means unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hittable: Option<bool>,

    /// Whether the element is enabled. `None` means unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Whether the element is selected (tabs, segmented controls, cells).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,

    /// Whether the element currently has keyboard focus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focused: Option<bool>,
}

impl UIElement {
    /// Creates an element of the given type with every other field empty.
    pub fn new(element_type: impl Into<String>) -> Self {
        Self {
            element_type: Some(element_type.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_frame(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.frame = Some(ElementFrame { x, y, width, height });
        self
    }

    pub fn with_children(mut self, children: Vec<UIElement>) -> Self {
        self.children = children;
        self
    }

    pub fn with_hittable(mut self, hittable: bool) -> Self {
        self.hittable = Some(hittable);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = Some(selected);
        self
    }

    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = Some(focused);
        self
    }

    /// The text a user sees for this element: the label, else the value.
    pub fn text(&self) -> Option<&str> {
        self.label.as_deref().or(self.value.as_deref())
    }

    /// Whether the element is on screen and touchable.
    ///
    /// An element reported as not hittable, or with a zero-area frame, is not
    /// displayed. Missing information counts as displayed.
    pub fn is_displayed(&self) -> bool {
        if self.hittable == Some(false) {
            return false;
        }
        self.frame.as_ref().map_or(true, |f| f.width > 0.0 && f.height > 0.0)
    }

    /// A short human-readable name for logs and error messages.
    pub fn describe(&self) -> String {
        let kind = self.element_type.as_deref().unwrap_or("Element");
        match (&self.identifier, &self.label) {
            (Some(id), _) => format!("{} '{}'", kind, id),
            (None, Some(label)) => format!("{} labelled '{}'", kind, label),
            (None, None) => kind.to_string(),
        }
    }
}

/// Position and size in screen points, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementFrame {
    /// The centre point, rounded to whole screen points.
    pub fn center(&self) -> (i32, i32) {
        (
            (self.x + self.width / 2.0).round() as i32,
            (self.y + self.height / 2.0).round() as i32,
        )
    }

    /// Whether `other` lies entirely within this frame.
    pub fn contains(&self, other: &ElementFrame) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }

    /// A point at the given fraction of the width and height, e.g. `(0.5, 0.8)`.
    pub fn point_at(&self, fx: f64, fy: f64) -> (i32, i32) {
        (
            (self.x + self.width * fx).round() as i32,
            (self.y + self.height * fy).round() as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_accessibility_keys() {
        let json = r#"{
            "AXUniqueId": "login-button",
            "AXLabel": "Log In",
            "type": "Button",
            "frame": {"x": 10, "y": 20, "width": 100, "height": 44},
            "hittable": true
        }"#;
        let element: UIElement = serde_json::from_str(json).unwrap();
        assert_eq!(element.identifier.as_deref(), Some("login-button"));
        assert_eq!(element.label.as_deref(), Some("Log In"));
        assert_eq!(element.element_type.as_deref(), Some("Button"));
        assert_eq!(element.hittable, Some(true));
        assert!(element.children.is_empty());
        assert!(element.enabled.is_none());
    }

    #[test]
    fn unknown_flags_are_not_serialized() {
        let json = serde_json::to_string(&UIElement::new("View")).unwrap();
        assert!(!json.contains("hittable"));
        assert!(!json.contains("focused"));
    }

    #[test]
    fn text_prefers_label_over_value() {
        let el = UIElement::new("TextField").with_value("typed");
        assert_eq!(el.text(), Some("typed"));
        let el = el.with_label("Email");
        assert_eq!(el.text(), Some("Email"));
    }

    #[test]
    fn displayed_requires_hittable_and_area() {
        assert!(UIElement::new("View").is_displayed());
        assert!(!UIElement::new("View").with_hittable(false).is_displayed());
        assert!(!UIElement::new("View").with_frame(0.0, 0.0, 0.0, 10.0).is_displayed());
        assert!(UIElement::new("View").with_frame(0.0, 0.0, 5.0, 10.0).is_displayed());
    }

    #[test]
    fn frame_center_and_contains() {
        let screen = ElementFrame { x: 0.0, y: 0.0, width: 390.0, height: 844.0 };
        let button = ElementFrame { x: 10.0, y: 20.0, width: 100.0, height: 44.0 };
        assert_eq!(button.center(), (60, 42));
        assert!(screen.contains(&button));
        assert!(!button.contains(&screen));
        assert_eq!(button.point_at(0.5, 0.0), (60, 20));
    }

    #[test]
    fn describe_uses_most_specific_name() {
        assert_eq!(UIElement::new("Button").with_id("ok").describe(), "Button 'ok'");
        assert_eq!(
            UIElement::new("Cell").with_label("Row 1").describe(),
            "Cell labelled 'Row 1'"
        );
        assert_eq!(UIElement::default().describe(), "Element");
    }
}
