//! View matchers: composable predicates that locate elements in a snapshot.
//!
//! A [`ViewMatcher`] is evaluated against one node of an [`ElementTree`].
//! Text patterns support glob wildcards (`*` for any run of characters, `?`
//! for exactly one). A pattern without wildcards must match exactly.
//!
//! ```
//! use trellis_core::matcher::ViewMatcher;
//!
//! let delete_in_list = ViewMatcher::all_of(vec![
//!     ViewMatcher::WithId("delete-*".into()),
//!     ViewMatcher::IsDescendantOf(Box::new(ViewMatcher::WithId("inbox".into()))),
//! ]);
//! assert_eq!(
//!     delete_in_list.to_string(),
//!     "(with id 'delete-*' and is descendant of (with id 'inbox'))"
//! );
//! ```

use std::fmt;

use crate::tree::ElementTree;

/// Glob match with `*` (any run, possibly empty) and `?` (one character).
///
/// Patterns without wildcards compare for equality.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    if !pattern.contains(['*', '?']) {
        return pattern == text;
    }

    let pat: Vec<char> = pattern.chars().collect();
    let txt: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    // Last `*` seen and the text position it was tried at.
    let mut star: Option<(usize, usize)> = None;

    while t < txt.len() {
        match pat.get(p) {
            Some(&'*') => {
                star = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == txt[t] => {
                p += 1;
                t += 1;
            }
            _ => match star {
                Some((sp, st)) => {
                    p = sp + 1;
                    t = st + 1;
                    star = Some((sp, st + 1));
                }
                None => return false,
            },
        }
    }
    pat[p..].iter().all(|&c| c == '*')
}

fn glob_opt(pattern: &str, text: Option<&str>) -> bool {
    text.map_or(false, |t| glob_match(pattern, t))
}

/// A predicate describing how to locate a UI element.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewMatcher {
    /// Accessibility identifier matches the glob.
    WithId(String),
    /// Accessibility label matches the glob.
    WithLabel(String),
    /// Accessibility value matches the glob.
    WithValue(String),
    /// Label or value matches the glob.
    WithText(String),
    /// Label or value contains the substring.
    ContainsText(String),
    /// Element type equals the given name (e.g. "Button").
    WithType(String),
    /// Accessibility role equals the given name.
    WithRole(String),
    IsDisplayed,
    IsEnabled,
    IsSelected,
    IsFocused,
    /// Element has exactly this many direct children.
    HasChildCount(usize),
    /// Direct parent matches.
    WithParent(Box<ViewMatcher>),
    /// Some ancestor matches.
    IsDescendantOf(Box<ViewMatcher>),
    /// Some descendant matches.
    HasDescendant(Box<ViewMatcher>),
    /// Element is the `position`-th direct child of a `parent` match.
    ChildAt {
        parent: Box<ViewMatcher>,
        position: usize,
    },
    /// Element is the first direct child of a `parent` match that satisfies `matcher`.
    ChildMatching {
        parent: Box<ViewMatcher>,
        matcher: Box<ViewMatcher>,
    },
    AllOf(Vec<ViewMatcher>),
    AnyOf(Vec<ViewMatcher>),
    Not(Box<ViewMatcher>),
}

impl ViewMatcher {
    /// Combines matchers with AND, collapsing a single matcher to itself.
    pub fn all_of(mut matchers: Vec<ViewMatcher>) -> Self {
        if matchers.len() == 1 {
            matchers.remove(0)
        } else {
            ViewMatcher::AllOf(matchers)
        }
    }

    /// Combines matchers with OR, collapsing a single matcher to itself.
    pub fn any_of(mut matchers: Vec<ViewMatcher>) -> Self {
        if matchers.len() == 1 {
            matchers.remove(0)
        } else {
            ViewMatcher::AnyOf(matchers)
        }
    }

    pub fn child_at(parent: ViewMatcher, position: usize) -> Self {
        ViewMatcher::ChildAt {
            parent: Box::new(parent),
            position,
        }
    }

    pub fn child_matching(parent: ViewMatcher, matcher: ViewMatcher) -> Self {
        ViewMatcher::ChildMatching {
            parent: Box::new(parent),
            matcher: Box::new(matcher),
        }
    }

    /// The scroll container implied by a positional matcher: the parent of
    /// a [`ViewMatcher::ChildAt`] or [`ViewMatcher::ChildMatching`].
    ///
    /// Views nested in a row (`IsDescendantOf` or `WithParent` a positional
    /// matcher) scroll inside the same list as the row.
    pub fn container(&self) -> Option<&ViewMatcher> {
        match self {
            ViewMatcher::ChildAt { parent, .. } | ViewMatcher::ChildMatching { parent, .. } => {
                Some(parent.as_ref())
            }
            ViewMatcher::AllOf(ms) => ms.iter().find_map(|m| m.container()),
            ViewMatcher::IsDescendantOf(inner) | ViewMatcher::WithParent(inner) => {
                inner.container()
            }
            _ => None,
        }
    }

    /// Whether the node at `idx` satisfies this matcher.
    pub fn matches(&self, tree: &ElementTree<'_>, idx: usize) -> bool {
        let el = tree.element(idx);
        match self {
            ViewMatcher::WithId(p) => glob_opt(p, el.identifier.as_deref()),
            ViewMatcher::WithLabel(p) => glob_opt(p, el.label.as_deref()),
            ViewMatcher::WithValue(p) => glob_opt(p, el.value.as_deref()),
            ViewMatcher::WithText(p) => {
                glob_opt(p, el.label.as_deref()) || glob_opt(p, el.value.as_deref())
            }
            ViewMatcher::ContainsText(s) => [&el.label, &el.value]
                .iter()
                .any(|t| t.as_deref().map_or(false, |t| t.contains(s.as_str()))),
            ViewMatcher::WithType(t) => el.element_type.as_deref() == Some(t.as_str()),
            ViewMatcher::WithRole(r) => el.role.as_deref() == Some(r.as_str()),
            ViewMatcher::IsDisplayed => el.is_displayed(),
            ViewMatcher::IsEnabled => el.enabled != Some(false),
            ViewMatcher::IsSelected => el.selected == Some(true),
            ViewMatcher::IsFocused => el.focused == Some(true),
            ViewMatcher::HasChildCount(n) => el.children.len() == *n,
            ViewMatcher::WithParent(m) => tree
                .node(idx)
                .parent
                .map_or(false, |p| m.matches(tree, p)),
            ViewMatcher::IsDescendantOf(m) => tree.ancestors(idx).any(|a| m.matches(tree, a)),
            ViewMatcher::HasDescendant(m) => tree.descendants(idx).any(|d| m.matches(tree, d)),
            ViewMatcher::ChildAt { parent, position } => {
                let node = tree.node(idx);
                node.position == *position
                    && node.parent.map_or(false, |p| parent.matches(tree, p))
            }
            ViewMatcher::ChildMatching { parent, matcher } => {
                tree.node(idx).parent.map_or(false, |p| parent.matches(tree, p))
                    && matcher.matches(tree, idx)
                    && !tree
                        .preceding_siblings(idx)
                        .iter()
                        .any(|&s| matcher.matches(tree, s))
            }
            ViewMatcher::AllOf(ms) => ms.iter().all(|m| m.matches(tree, idx)),
            ViewMatcher::AnyOf(ms) => ms.iter().any(|m| m.matches(tree, idx)),
            ViewMatcher::Not(m) => !m.matches(tree, idx),
        }
    }

    /// Indices of every matching node, in pre-order.
    pub fn find_all(&self, tree: &ElementTree<'_>) -> Vec<usize> {
        tree.indices().filter(|&i| self.matches(tree, i)).collect()
    }
}

fn join(f: &mut fmt::Formatter<'_>, matchers: &[ViewMatcher], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, m) in matchers.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", sep)?;
        }
        write!(f, "{}", m)?;
    }
    write!(f, ")")
}

impl fmt::Display for ViewMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMatcher::WithId(p) => write!(f, "with id '{}'", p),
            ViewMatcher::WithLabel(p) => write!(f, "with label '{}'", p),
            ViewMatcher::WithValue(p) => write!(f, "with value '{}'", p),
            ViewMatcher::WithText(p) => write!(f, "with text '{}'", p),
            ViewMatcher::ContainsText(s) => write!(f, "containing text '{}'", s),
            ViewMatcher::WithType(t) => write!(f, "of type {}", t),
            ViewMatcher::WithRole(r) => write!(f, "with role {}", r),
            ViewMatcher::IsDisplayed => write!(f, "is displayed"),
            ViewMatcher::IsEnabled => write!(f, "is enabled"),
            ViewMatcher::IsSelected => write!(f, "is selected"),
            ViewMatcher::IsFocused => write!(f, "is focused"),
            ViewMatcher::HasChildCount(n) => write!(f, "with {} children", n),
            ViewMatcher::WithParent(m) => write!(f, "with parent ({})", m),
            ViewMatcher::IsDescendantOf(m) => write!(f, "is descendant of ({})", m),
            ViewMatcher::HasDescendant(m) => write!(f, "has descendant ({})", m),
            ViewMatcher::ChildAt { parent, position } => {
                write!(f, "child {} of ({})", position, parent)
            }
            ViewMatcher::ChildMatching { parent, matcher } => {
                write!(f, "first child ({}) of ({})", matcher, parent)
            }
            ViewMatcher::AllOf(ms) => join(f, ms, "and"),
            ViewMatcher::AnyOf(ms) => join(f, ms, "or"),
            ViewMatcher::Not(m) => write!(f, "not ({})", m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::UIElement;

    fn inbox() -> Vec<UIElement> {
        vec![UIElement::new("Window").with_children(vec![
            UIElement::new("Table").with_id("inbox").with_children(vec![
                UIElement::new("Cell").with_label("Lunch?").with_children(vec![
                    UIElement::new("Button").with_id("delete-0"),
                ]),
                UIElement::new("Cell").with_label("Invoice").with_selected(true),
                UIElement::new("Cell").with_label("Invoice"),
            ]),
            UIElement::new("TextField")
                .with_id("search")
                .with_value("inv")
                .with_focused(true)
                .with_enabled(false),
        ])]
    }

    fn labels(tree: &ElementTree<'_>, hits: &[usize]) -> Vec<String> {
        hits.iter().map(|&i| tree.element(i).describe()).collect()
    }

    #[test]
    fn glob_without_wildcards_is_equality() {
        assert!(glob_match("Inbox", "Inbox"));
        assert!(!glob_match("Inbox", "Inbox (3)"));
    }

    #[test]
    fn glob_wildcards() {
        assert!(glob_match("delete-*", "delete-42"));
        assert!(glob_match("delete-*", "delete-"));
        assert!(!glob_match("delete-*", "undelete-1"));
        assert!(glob_match("Row ?", "Row 7"));
        assert!(!glob_match("Row ?", "Row 10"));
        assert!(glob_match("*unread*", "3 unread messages"));
        assert!(glob_match("a*b*c", "aXbYbZc"));
        assert!(!glob_match("a*b?c", "abc"));
    }

    #[test]
    fn leaf_matchers() {
        let roots = inbox();
        let tree = ElementTree::new(&roots);

        let hits = ViewMatcher::WithId("delete-*".into()).find_all(&tree);
        assert_eq!(labels(&tree, &hits), vec!["Button 'delete-0'"]);

        let hits = ViewMatcher::WithText("inv".into()).find_all(&tree);
        assert_eq!(labels(&tree, &hits), vec!["TextField 'search'"]);

        let hits = ViewMatcher::ContainsText("voice".into()).find_all(&tree);
        assert_eq!(hits.len(), 2);

        assert_eq!(ViewMatcher::IsSelected.find_all(&tree).len(), 1);
        assert_eq!(ViewMatcher::IsFocused.find_all(&tree).len(), 1);
        let disabled = ViewMatcher::Not(Box::new(ViewMatcher::IsEnabled)).find_all(&tree);
        assert_eq!(labels(&tree, &disabled), vec!["TextField 'search'"]);
        assert_eq!(ViewMatcher::HasChildCount(3).find_all(&tree).len(), 1);
    }

    #[test]
    fn structural_matchers() {
        let roots = inbox();
        let tree = ElementTree::new(&roots);
        let list = || Box::new(ViewMatcher::WithId("inbox".into()));

        let cells = ViewMatcher::WithParent(list()).find_all(&tree);
        assert_eq!(cells.len(), 3);

        let inside = ViewMatcher::all_of(vec![
            ViewMatcher::WithType("Button".into()),
            ViewMatcher::IsDescendantOf(list()),
        ])
        .find_all(&tree);
        assert_eq!(labels(&tree, &inside), vec!["Button 'delete-0'"]);

        let with_button = ViewMatcher::all_of(vec![
            ViewMatcher::WithType("Cell".into()),
            ViewMatcher::HasDescendant(Box::new(ViewMatcher::WithType("Button".into()))),
        ])
        .find_all(&tree);
        assert_eq!(labels(&tree, &with_button), vec!["Cell labelled 'Lunch?'"]);
    }

    #[test]
    fn child_at_targets_position() {
        let roots = inbox();
        let tree = ElementTree::new(&roots);
        let hits = ViewMatcher::child_at(ViewMatcher::WithId("inbox".into()), 1).find_all(&tree);
        assert_eq!(hits.len(), 1);
        assert_eq!(tree.node(hits[0]).position, 1);
        assert_eq!(tree.element(hits[0]).selected, Some(true));

        let none = ViewMatcher::child_at(ViewMatcher::WithId("inbox".into()), 7).find_all(&tree);
        assert!(none.is_empty());
    }

    #[test]
    fn child_matching_takes_first_satisfying_entry() {
        let roots = inbox();
        let tree = ElementTree::new(&roots);
        let hits = ViewMatcher::child_matching(
            ViewMatcher::WithId("inbox".into()),
            ViewMatcher::WithLabel("Invoice".into()),
        )
        .find_all(&tree);
        assert_eq!(hits.len(), 1);
        assert_eq!(tree.node(hits[0]).position, 1);
    }

    #[test]
    fn any_of_and_collapse() {
        let m = ViewMatcher::all_of(vec![ViewMatcher::IsFocused]);
        assert_eq!(m, ViewMatcher::IsFocused);

        let roots = inbox();
        let tree = ElementTree::new(&roots);
        let hits = ViewMatcher::any_of(vec![
            ViewMatcher::WithId("search".into()),
            ViewMatcher::WithId("inbox".into()),
        ])
        .find_all(&tree);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn container_of_positional_matchers() {
        let list = ViewMatcher::WithId("inbox".into());
        let child = ViewMatcher::child_at(list.clone(), 3);
        assert_eq!(child.container(), Some(&list));
        let nested = ViewMatcher::all_of(vec![child, ViewMatcher::IsDisplayed]);
        assert_eq!(nested.container(), Some(&list));
        assert_eq!(ViewMatcher::WithId("x".into()).container(), None);
    }

    #[test]
    fn views_inside_a_row_scroll_in_its_list() {
        let list = ViewMatcher::WithId("inbox".into());
        let row = ViewMatcher::child_at(list.clone(), 7);
        let title = ViewMatcher::all_of(vec![
            ViewMatcher::WithId("title".into()),
            ViewMatcher::IsDescendantOf(Box::new(row.clone())),
        ]);
        assert_eq!(title.container(), Some(&list));
        let badge = ViewMatcher::WithParent(Box::new(ViewMatcher::child_matching(
            list.clone(),
            ViewMatcher::WithValue("unread".into()),
        )));
        assert_eq!(badge.container(), Some(&list));
        let outside = ViewMatcher::IsDescendantOf(Box::new(ViewMatcher::WithId("header".into())));
        assert_eq!(outside.container(), None);
    }

    #[test]
    fn display_describes_matcher() {
        let m = ViewMatcher::child_at(ViewMatcher::WithId("inbox".into()), 2);
        assert_eq!(m.to_string(), "child 2 of (with id 'inbox')");

        let m = ViewMatcher::AnyOf(vec![
            ViewMatcher::WithType("Button".into()),
            ViewMatcher::Not(Box::new(ViewMatcher::IsEnabled)),
        ]);
        assert_eq!(m.to_string(), "(of type Button or not (is enabled))");
    }
}
