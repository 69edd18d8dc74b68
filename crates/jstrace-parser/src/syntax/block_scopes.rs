//! Block-scope lookup.
//!
//! A block scope is the program root or the body block of a function. Plain
//! blocks (`if`, `for`, bare `{}`) are not scopes here: `var` bindings inside
//! them belong to the surrounding function.

use crate::parser::{Node, NodeArena, NodeIndex};
use jstrace_common::limits::MAX_TREE_WALK_ITERATIONS;
use smallvec::SmallVec;
use tracing::warn;

/// Enclosing block scopes of a node, innermost first.
pub type ScopeChain = SmallVec<[NodeIndex; 4]>;

/// Whether `index` opens a block scope.
pub fn has_block_scope(arena: &NodeArena, index: NodeIndex) -> bool {
    match arena.get(index) {
        Some(Node::Program(_)) => true,
        Some(Node::Block(_)) => arena
            .get(arena.parent(index))
            .is_some_and(Node::is_function_like),
        _ => false,
    }
}

/// Every block scope lexically enclosing `index`, innermost first.
///
/// Only strict ancestors are considered: a function body block passed in
/// directly is not part of its own chain. The last element is the program
/// root when the node is attached to one.
pub fn block_scopes_of_node(arena: &NodeArena, index: NodeIndex) -> ScopeChain {
    let mut scopes = ScopeChain::new();
    let mut current = arena.parent(index);
    let mut iterations = 0;

    while current.is_some() {
        iterations += 1;
        if iterations > MAX_TREE_WALK_ITERATIONS {
            warn!(node = index.0, "parent walk exceeded iteration limit");
            break;
        }
        if has_block_scope(arena, current) {
            scopes.push(current);
        }
        current = arena.parent(current);
    }

    scopes
}

/// Innermost block scope enclosing `index`.
pub fn innermost_block_scope(arena: &NodeArena, index: NodeIndex) -> Option<NodeIndex> {
    block_scopes_of_node(arena, index).first().copied()
}
