//! Syntax utilities shared by the analyzer.

pub mod block_scopes;
pub use block_scopes::{ScopeChain, block_scopes_of_node, has_block_scope, innermost_block_scope};
