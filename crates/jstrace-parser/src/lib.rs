//! Arena AST for JavaScript call-site analysis.
//!
//! - `parser`: node handles, node data, the arena, pre-order traversal
//! - `syntax`: block-scope lookup
//! - `estree`: import of ESTree JSON produced by external parsers

pub mod parser;
pub use parser::{Node, NodeArena, NodeIndex, NodeList};

pub mod syntax;

pub mod estree;
pub use estree::{EstreeImportError, import_program, import_program_str};
