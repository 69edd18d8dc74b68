//! Resolved callee descriptors and the extractor seam.

use jstrace_parser::{NodeArena, NodeIndex};
use serde::{Deserialize, Serialize};

/// A resolved callee: the body block that runs when the call is made.
///
/// Only built from a matched function literal, so `body` always refers to an
/// existing block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalleeData {
    pub body: NodeIndex,
    pub name: Option<String>,
}

impl CalleeData {
    pub fn new(body: NodeIndex, name: Option<String>) -> CalleeData {
        CalleeData { body, name }
    }
}

/// One resolved call and the calls made inside the resolved body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackTraceData {
    pub name: Option<String>,
    /// Body block of the resolved callee.
    pub callee: NodeIndex,
    pub stack_trace: Vec<StackTraceData>,
}

impl StackTraceData {
    /// Number of entries in this subtree, including `self`.
    pub fn total_calls(&self) -> usize {
        1 + self
            .stack_trace
            .iter()
            .map(StackTraceData::total_calls)
            .sum::<usize>()
    }
}

/// Resolves a callee expression to the body it runs.
///
/// Implementations are pure: the same arena, scope body and callee always
/// give the same answer. `None` covers both unsupported callee shapes and
/// callees whose target could not be found.
pub trait CalleeDataExtractor: Send + Sync {
    /// `block_scope_body` is the statement list the call occurs in; `callee`
    /// is the call's callee expression.
    fn extract(
        &self,
        arena: &NodeArena,
        block_scope_body: &[NodeIndex],
        callee: NodeIndex,
    ) -> Option<CalleeData>;
}
