//! Indexed view over a hierarchy snapshot.
//!
//! [`UIElement`] only links downwards. Structural matchers need to look up
//! the parent and the sibling position of an element, so a snapshot is
//! flattened once into an [`ElementTree`] in depth-first pre-order.

use crate::element::UIElement;

/// One element of a flattened snapshot.
#[derive(Debug)]
pub struct Node<'a> {
    pub element: &'a UIElement,
    pub parent: Option<usize>,
    /// Position among the parent's children (or among the roots).
    pub position: usize,
    pub children: Vec<usize>,
    /// One past the last index of this node's subtree.
    pub end: usize,
}

/// A flattened, borrow-only snapshot of one or more element trees.
#[derive(Debug)]
pub struct ElementTree<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> ElementTree<'a> {
    pub fn new<I>(roots: I) -> Self
    where
        I: IntoIterator<Item = &'a UIElement>,
    {
        let mut tree = Self { nodes: Vec::new() };
        for (position, root) in roots.into_iter().enumerate() {
            tree.push(root, None, position);
        }
        tree
    }

    fn push(&mut self, element: &'a UIElement, parent: Option<usize>, position: usize) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            element,
            parent,
            position,
            children: Vec::with_capacity(element.children.len()),
            end: idx + 1,
        });
        for (child_pos, child) in element.children.iter().enumerate() {
            let child_idx = self.push(child, Some(idx), child_pos);
            self.nodes[idx].children.push(child_idx);
        }
        self.nodes[idx].end = self.nodes.len();
        idx
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: usize) -> &Node<'a> {
        &self.nodes[idx]
    }

    pub fn element(&self, idx: usize) -> &'a UIElement {
        self.nodes[idx].element
    }

    /// Node indices in pre-order.
    pub fn indices(&self) -> std::ops::Range<usize> {
        0..self.nodes.len()
    }

    /// Ancestors of `idx`, nearest first.
    pub fn ancestors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.nodes[idx].parent, move |&p| self.nodes[p].parent)
    }

    /// All descendants of `idx` in pre-order.
    ///
    /// Pre-order numbering makes a subtree a contiguous index range.
    pub fn descendants(&self, idx: usize) -> std::ops::Range<usize> {
        idx + 1..self.nodes[idx].end
    }

    /// Siblings that come before `idx` under the same parent.
    pub fn preceding_siblings(&self, idx: usize) -> &[usize] {
        match self.nodes[idx].parent {
            Some(p) => {
                let position = self.nodes[idx].position;
                &self.nodes[p].children[..position]
            }
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<UIElement> {
        vec![UIElement::new("Window").with_id("main").with_children(vec![
            UIElement::new("Table").with_id("list").with_children(vec![
                UIElement::new("Cell").with_label("Row 0"),
                UIElement::new("Cell")
                    .with_label("Row 1")
                    .with_children(vec![UIElement::new("Button").with_id("delete")]),
            ]),
            UIElement::new("Button").with_id("add"),
        ])]
    }

    #[test]
    fn flattens_in_pre_order() {
        let roots = sample();
        let tree = ElementTree::new(&roots);
        let ids: Vec<_> = tree
            .indices()
            .map(|i| tree.element(i).describe())
            .collect();
        assert_eq!(
            ids,
            vec![
                "Window 'main'",
                "Table 'list'",
                "Cell labelled 'Row 0'",
                "Cell labelled 'Row 1'",
                "Button 'delete'",
                "Button 'add'",
            ]
        );
    }

    #[test]
    fn tracks_parent_and_position() {
        let roots = sample();
        let tree = ElementTree::new(&roots);
        assert_eq!(tree.node(3).parent, Some(1));
        assert_eq!(tree.node(3).position, 1);
        assert_eq!(tree.node(1).children, vec![2, 3]);
        assert_eq!(tree.ancestors(4).collect::<Vec<_>>(), vec![3, 1, 0]);
    }

    #[test]
    fn descendants_are_contiguous() {
        let roots = sample();
        let tree = ElementTree::new(&roots);
        assert_eq!(tree.descendants(1), 2..5);
        assert_eq!(tree.descendants(5), 6..6);
        assert_eq!(tree.descendants(0), 1..6);
        assert_eq!(tree.descendants(3), 4..5);
    }

    #[test]
    fn subtree_end_is_recorded_per_node() {
        let roots = sample();
        let tree = ElementTree::new(&roots);
        let ends: Vec<_> = tree.indices().map(|i| tree.node(i).end).collect();
        assert_eq!(ends, vec![6, 5, 3, 5, 5, 6]);
    }

    #[test]
    fn preceding_siblings_of_second_child() {
        let roots = sample();
        let tree = ElementTree::new(&roots);
        assert_eq!(tree.preceding_siblings(3), &[2]);
        assert!(tree.preceding_siblings(0).is_empty());
    }

    #[test]
    fn empty_snapshot() {
        let roots: Vec<UIElement> = vec![];
        let tree = ElementTree::new(&roots);
        assert!(tree.is_empty());
    }
}
