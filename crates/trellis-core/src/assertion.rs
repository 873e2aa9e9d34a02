//! Assertions checked against the element a matcher resolves to.

use std::fmt;

use crate::matcher::{glob_match, ViewMatcher};
use crate::tree::ElementTree;

/// A condition on the (possibly absent) element a view resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAssertion {
    IsDisplayed,
    /// Absent, or present but not displayed.
    IsNotDisplayed,
    Exists,
    DoesNotExist,
    /// Label or value matches the glob.
    HasText(String),
    /// Label or value contains the substring.
    ContainsText(String),
    /// Value matches the glob.
    HasValue(String),
    IsEnabled,
    IsDisabled,
    IsSelected,
    IsNotSelected,
    IsFocused,
    HasChildCount(usize),
    /// The element satisfies an arbitrary matcher.
    Matches(ViewMatcher),
}

impl ViewAssertion {
    pub fn name(&self) -> &'static str {
        match self {
            ViewAssertion::IsDisplayed => "is_displayed",
            ViewAssertion::IsNotDisplayed => "is_not_displayed",
            ViewAssertion::Exists => "exists",
            ViewAssertion::DoesNotExist => "does_not_exist",
            ViewAssertion::HasText(_) => "has_text",
            ViewAssertion::ContainsText(_) => "contains_text",
            ViewAssertion::HasValue(_) => "has_value",
            ViewAssertion::IsEnabled => "is_enabled",
            ViewAssertion::IsDisabled => "is_disabled",
            ViewAssertion::IsSelected => "is_selected",
            ViewAssertion::IsNotSelected => "is_not_selected",
            ViewAssertion::IsFocused => "is_focused",
            ViewAssertion::HasChildCount(_) => "has_child_count",
            ViewAssertion::Matches(_) => "matches",
        }
    }

    /// Whether the assertion can pass when nothing matches.
    fn accepts_absent(&self) -> bool {
        matches!(self, ViewAssertion::IsNotDisplayed | ViewAssertion::DoesNotExist)
    }

    /// Evaluates the assertion against the located node.
    ///
    /// Returns a description of the mismatch on failure.
    pub fn evaluate(&self, tree: &ElementTree<'_>, found: Option<usize>) -> Result<(), String> {
        let idx = match found {
            Some(idx) => idx,
            None if self.accepts_absent() => return Ok(()),
            None => return Err("no matching element on screen".to_string()),
        };
        let el = tree.element(idx);
        let text = || {
            format!(
                "label {:?}, value {:?}",
                el.label.as_deref().unwrap_or(""),
                el.value.as_deref().unwrap_or("")
            )
        };

        let (ok, detail) = match self {
            ViewAssertion::IsDisplayed => (el.is_displayed(), format!("{} is not displayed", el.describe())),
            ViewAssertion::IsNotDisplayed => (!el.is_displayed(), format!("{} is displayed", el.describe())),
            ViewAssertion::Exists => (true, String::new()),
            ViewAssertion::DoesNotExist => (false, format!("{} exists", el.describe())),
            ViewAssertion::HasText(p) => (
                el.label.as_deref().map_or(false, |l| glob_match(p, l))
                    || el.value.as_deref().map_or(false, |v| glob_match(p, v)),
                text(),
            ),
            ViewAssertion::ContainsText(s) => (
                [&el.label, &el.value]
                    .iter()
                    .any(|t| t.as_deref().map_or(false, |t| t.contains(s.as_str()))),
                text(),
            ),
            ViewAssertion::HasValue(p) => (
                el.value.as_deref().map_or(false, |v| glob_match(p, v)),
                format!("value {:?}", el.value.as_deref().unwrap_or("")),
            ),
            ViewAssertion::IsEnabled => (el.enabled != Some(false), format!("{} is disabled", el.describe())),
            ViewAssertion::IsDisabled => (el.enabled == Some(false), format!("{} is enabled", el.describe())),
            ViewAssertion::IsSelected => (el.selected == Some(true), format!("{} is not selected", el.describe())),
            ViewAssertion::IsNotSelected => (el.selected != Some(true), format!("{} is selected", el.describe())),
            ViewAssertion::IsFocused => (el.focused == Some(true), format!("{} is not focused", el.describe())),
            ViewAssertion::HasChildCount(n) => (
                el.children.len() == *n,
                format!("{} has {} children", el.describe(), el.children.len()),
            ),
            ViewAssertion::Matches(m) => (
                m.matches(tree, idx),
                format!("{} does not match {}", el.describe(), m),
            ),
        };

        if ok {
            Ok(())
        } else {
            Err(detail)
        }
    }
}

impl fmt::Display for ViewAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewAssertion::HasText(p) => write!(f, "has text '{}'", p),
            ViewAssertion::ContainsText(s) => write!(f, "contains text '{}'", s),
            ViewAssertion::HasValue(p) => write!(f, "has value '{}'", p),
            ViewAssertion::HasChildCount(n) => write!(f, "has {} children", n),
            ViewAssertion::Matches(m) => write!(f, "matches {}", m),
            other => f.write_str(&other.name().replace('_', " ")),
        }
    }
}
