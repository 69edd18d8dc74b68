//! Callee resolution for function expressions.
//!
//! Two callee shapes are understood:
//!
//! - a name reference `f(...)`, resolved by finding `f = function () {...}`
//!   in the innermost block scope enclosing the first statement of the scope
//!   body;
//! - an inline function expression `(function () {...})(...)`, which is its
//!   own answer.
//!
//! Everything else (member calls, calls of call results, arrows, function
//! declarations) resolves to nothing.

use crate::callee_data::{CalleeData, CalleeDataExtractor};
use jstrace_parser::parser::{Node, NodeArena, NodeIndex};
use jstrace_parser::syntax::innermost_block_scope;
use tracing::trace;

#[derive(Clone, Copy, Debug, Default)]
pub struct FunctionExpressionCalleeDataExtractor;

impl FunctionExpressionCalleeDataExtractor {
    pub fn new() -> FunctionExpressionCalleeDataExtractor {
        FunctionExpressionCalleeDataExtractor
    }
}

impl CalleeDataExtractor for FunctionExpressionCalleeDataExtractor {
    fn extract(
        &self,
        arena: &NodeArena,
        block_scope_body: &[NodeIndex],
        callee: NodeIndex,
    ) -> Option<CalleeData> {
        match arena.get(callee)? {
            Node::Identifier(ident) => {
                let first_statement = *block_scope_body.first()?;
                let scope = innermost_block_scope(arena, first_statement)?;
                let body = find_bound_function_expression(arena, scope, &ident.escaped_text)?;
                trace!(
                    name = %ident.escaped_text,
                    scope = scope.0,
                    body = body.0,
                    "resolved callee by name"
                );
                Some(CalleeData::new(body, Some(ident.escaped_text.clone())))
            }
            Node::FunctionExpression(func) => {
                let body = func.body.into_option()?;
                let name = arena.identifier_text(func.name).map(str::to_owned);
                Some(CalleeData::new(body, name))
            }
            _ => None,
        }
    }
}

/// Body of the first function expression bound to `name` under `root`.
///
/// Walks the subtree in pre-order and stops at the first function expression
/// whose parent is a variable binding with the simple target `name`. Nested
/// scopes are not treated specially: when a name is bound more than once,
/// the binding visited first wins, even if a later one is more deeply nested.
pub fn find_bound_function_expression(
    arena: &NodeArena,
    root: NodeIndex,
    name: &str,
) -> Option<NodeIndex> {
    let (function, _) = arena
        .pre_order(root)
        .find(|&(node, parent)| is_function_expression_bound_to(arena, node, parent, name))?;
    arena.get_function(function)?.body.into_option()
}

fn is_function_expression_bound_to(
    arena: &NodeArena,
    node: NodeIndex,
    parent: NodeIndex,
    name: &str,
) -> bool {
    if !arena.get(node).is_some_and(Node::is_function_expression) {
        return false;
    }
    arena
        .get_variable_declaration(parent)
        .and_then(|binding| arena.identifier_text(binding.name))
        .is_some_and(|bound| bound == name)
}
