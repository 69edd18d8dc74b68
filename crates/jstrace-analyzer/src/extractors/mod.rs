//! Callee data extractors.

pub mod function_expression;
pub use function_expression::{FunctionExpressionCalleeDataExtractor, find_bound_function_expression};
