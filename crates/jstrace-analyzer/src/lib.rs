//! Callee resolution and stack-trace analysis for JavaScript call sites.
//!
//! Given the statements of a scope and the callee expression of a call made
//! in it, the extractors find the function body the call runs, without
//! executing anything. [`StackTraceAnalyzer`] applies them to every call of a
//! program and recurses into the resolved bodies.

pub mod callee_data;
pub use callee_data::{CalleeData, CalleeDataExtractor, StackTraceData};

pub mod extractors;
pub use extractors::{FunctionExpressionCalleeDataExtractor, find_bound_function_expression};

pub mod stack_trace;
pub use stack_trace::{StackTraceAnalyzer, limit_index};

#[cfg(test)]
#[path = "tests/limit_index_tests.rs"]
mod limit_index_tests;
