//! Pre-order traversal over the arena.
//!
//! [`PreOrder`] yields `(node, parent)` pairs, visiting a node before any of
//! its children and children in source order. It is an ordinary iterator, so
//! early termination is just short-circuiting: `find`, `find_map`, `any`, or
//! dropping the iterator stops the walk with nothing else visited.

use super::base::NodeIndex;
use super::node::NodeArena;

/// Pre-order iterator created by [`NodeArena::pre_order`].
pub struct PreOrder<'a> {
    arena: &'a NodeArena,
    stack: Vec<(NodeIndex, NodeIndex)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (NodeIndex, NodeIndex);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, parent) = self.stack.pop()?;
        let children = self.arena.get_children(node);
        self.stack
            .extend(children.iter().rev().map(|&child| (child, node)));
        Some((node, parent))
    }
}

impl NodeArena {
    /// Walk the subtree rooted at `root` in pre-order.
    ///
    /// The root itself is visited first with a `NONE` parent, regardless of
    /// its parent link: the walk never looks outside the subtree.
    pub fn pre_order(&self, root: NodeIndex) -> PreOrder<'_> {
        let mut stack = Vec::with_capacity(16);
        if self.get(root).is_some() {
            stack.push((root, NodeIndex::NONE));
        }
        PreOrder { arena: self, stack }
    }
}
