//! Arena AST: node handles, node data, construction, access and traversal.

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod node;
pub use node::*;

mod node_access;
mod node_arena;

pub mod traverse;
pub use traverse::PreOrder;

#[cfg(test)]
#[path = "tests/traverse_tests.rs"]
mod traverse_tests;
