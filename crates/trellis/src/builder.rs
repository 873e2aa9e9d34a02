//! Fluent matcher builder used by every view declaration.
//!
//! ```
//! use trellis::builder::ViewBuilder;
//!
//! let matcher = ViewBuilder::new()
//!     .with_type("Button")
//!     .with_label("Delete*")
//!     .is_descendant_of(|b| b.with_id("inbox"))
//!     .build();
//! assert_eq!(
//!     matcher.to_string(),
//!     "(of type Button and with label 'Delete*' and is descendant of (with id 'inbox'))"
//! );
//! ```

use trellis_core::matcher::ViewMatcher;

/// Accumulates matchers; [`build`](ViewBuilder::build) ANDs them together.
#[derive(Debug, Clone, Default)]
pub struct ViewBuilder {
    matchers: Vec<ViewMatcher>,
}

impl ViewBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a builder closure on a fresh builder and returns its matcher.
    pub fn from_fn<F>(f: F) -> ViewMatcher
    where
        F: FnOnce(ViewBuilder) -> ViewBuilder,
    {
        f(ViewBuilder::new()).build()
    }

    fn push(mut self, matcher: ViewMatcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Accessibility identifier; `*` and `?` are wildcards.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.push(ViewMatcher::WithId(id.into()))
    }

    pub fn with_label(self, label: impl Into<String>) -> Self {
        self.push(ViewMatcher::WithLabel(label.into()))
    }

    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.push(ViewMatcher::WithValue(value.into()))
    }

    /// Label or value.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(ViewMatcher::WithText(text.into()))
    }

    pub fn containing_text(self, text: impl Into<String>) -> Self {
        self.push(ViewMatcher::ContainsText(text.into()))
    }

    pub fn with_type(self, element_type: impl Into<String>) -> Self {
        self.push(ViewMatcher::WithType(element_type.into()))
    }

    pub fn with_role(self, role: impl Into<String>) -> Self {
        self.push(ViewMatcher::WithRole(role.into()))
    }

    pub fn displayed(self) -> Self {
        self.push(ViewMatcher::IsDisplayed)
    }

    pub fn enabled(self) -> Self {
        self.push(ViewMatcher::IsEnabled)
    }

    pub fn selected(self) -> Self {
        self.push(ViewMatcher::IsSelected)
    }

    pub fn focused(self) -> Self {
        self.push(ViewMatcher::IsFocused)
    }

    pub fn with_child_count(self, count: usize) -> Self {
        self.push(ViewMatcher::HasChildCount(count))
    }

    pub fn with_parent<F>(self, f: F) -> Self
    where
        F: FnOnce(ViewBuilder) -> ViewBuilder,
    {
        self.push(ViewMatcher::WithParent(Box::new(Self::from_fn(f))))
    }

    pub fn is_descendant_of<F>(self, f: F) -> Self
    where
        F: FnOnce(ViewBuilder) -> ViewBuilder,
    {
        self.push(ViewMatcher::IsDescendantOf(Box::new(Self::from_fn(f))))
    }

    pub fn with_descendant<F>(self, f: F) -> Self
    where
        F: FnOnce(ViewBuilder) -> ViewBuilder,
    {
        self.push(ViewMatcher::HasDescendant(Box::new(Self::from_fn(f))))
    }

    pub fn not<F>(self, f: F) -> Self
    where
        F: FnOnce(ViewBuilder) -> ViewBuilder,
    {
        self.push(ViewMatcher::Not(Box::new(Self::from_fn(f))))
    }

    pub fn any_of(self, matchers: Vec<ViewMatcher>) -> Self {
        self.push(ViewMatcher::any_of(matchers))
    }

    /// Adds a prebuilt matcher.
    pub fn matching(self, matcher: ViewMatcher) -> Self {
        self.push(matcher)
    }

    pub fn build(self) -> ViewMatcher {
        ViewMatcher::all_of(self.matchers)
    }
}
