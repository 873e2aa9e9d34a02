//! Root matchers select which windows of a snapshot are searched.
//!
//! A backend reports one root element per window (application window,
//! alerts, keyboards, system overlays). Most lookups search all of them;
//! dialogs and popups are easier to target with [`RootMatcher::Topmost`].

use std::fmt;

use crate::element::UIElement;
use crate::matcher::ViewMatcher;
use crate::tree::ElementTree;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RootMatcher {
    /// Search every window.
    #[default]
    Any,
    /// Only the window at this index, counting from the back.
    Index(usize),
    /// Only the last (frontmost) window.
    Topmost,
    /// Windows whose root element satisfies the matcher.
    Matching(ViewMatcher),
}

impl RootMatcher {
    /// The root elements this matcher selects, in their original order.
    pub fn select<'a>(&self, roots: &'a [UIElement]) -> Vec<&'a UIElement> {
        match self {
            RootMatcher::Any => roots.iter().collect(),
            RootMatcher::Index(i) => roots.get(*i).into_iter().collect(),
            RootMatcher::Topmost => roots.last().into_iter().collect(),
            RootMatcher::Matching(m) => roots
                .iter()
                .filter(|root| {
                    let single = ElementTree::new(std::iter::once(*root));
                    m.matches(&single, 0)
                })
                .collect(),
        }
    }
}

impl fmt::Display for RootMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootMatcher::Any => write!(f, "any window"),
            RootMatcher::Index(i) => write!(f, "window {}", i),
            RootMatcher::Topmost => write!(f, "topmost window"),
            RootMatcher::Matching(m) => write!(f, "window {}", m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows() -> Vec<UIElement> {
        vec![
            UIElement::new("Window").with_id("app"),
            UIElement::new("Alert").with_id("confirm"),
        ]
    }

    #[test]
    fn any_selects_all() {
        let roots = windows();
        assert_eq!(RootMatcher::Any.select(&roots).len(), 2);
        assert_eq!(RootMatcher::default(), RootMatcher::Any);
    }

    #[test]
    fn topmost_and_index() {
        let roots = windows();
        let top = RootMatcher::Topmost.select(&roots);
        assert_eq!(top[0].identifier.as_deref(), Some("confirm"));
        let first = RootMatcher::Index(0).select(&roots);
        assert_eq!(first[0].identifier.as_deref(), Some("app"));
        assert!(RootMatcher::Index(5).select(&roots).is_empty());
        assert!(RootMatcher::Topmost.select(&[]).is_empty());
    }

    #[test]
    fn matching_checks_root_element_only() {
        let roots = windows();
        let alerts = RootMatcher::Matching(ViewMatcher::WithType("Alert".into())).select(&roots);
        assert_eq!(alerts.len(), 1);
        assert_eq!(
            RootMatcher::Matching(ViewMatcher::WithType("Alert".into())).to_string(),
            "window of type Alert"
        );
    }
}
