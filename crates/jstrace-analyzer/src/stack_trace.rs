//! Stack-trace analysis.
//!
//! Starting from the program body, every call made directly in a scope is
//! resolved with the registered extractors, and each resolved body is
//! analyzed the same way. Calls nested inside other functions belong to
//! those functions and are only reached when that function is itself called.

use crate::callee_data::{CalleeDataExtractor, StackTraceData};
use crate::extractors::FunctionExpressionCalleeDataExtractor;
use jstrace_common::limits::{
    MAX_STACK_TRACE_DEPTH, STACK_TRACE_LIMIT_ACTIVATION_LENGTH, STACK_TRACE_LIMIT_THRESHOLD,
};
use jstrace_parser::syntax::innermost_block_scope;
use jstrace_parser::{NodeArena, NodeIndex};
use rayon::prelude::*;
use tracing::{debug, warn};

pub struct StackTraceAnalyzer {
    extractors: Vec<Box<dyn CalleeDataExtractor>>,
}

impl Default for StackTraceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl StackTraceAnalyzer {
    /// Analyzer with the function-expression extractor.
    pub fn new() -> StackTraceAnalyzer {
        StackTraceAnalyzer {
            extractors: vec![Box::new(FunctionExpressionCalleeDataExtractor::new())],
        }
    }

    /// Analyzer with a caller-chosen extractor set, consulted in order.
    pub fn with_extractors(extractors: Vec<Box<dyn CalleeDataExtractor>>) -> StackTraceAnalyzer {
        StackTraceAnalyzer { extractors }
    }

    pub fn register(&mut self, extractor: Box<dyn CalleeDataExtractor>) {
        self.extractors.push(extractor);
    }

    /// Stack trace of a program. Returns nothing when `program` has no statements.
    #[tracing::instrument(level = "debug", skip(self, arena, program), fields(program = program.0))]
    pub fn analyze(&self, arena: &NodeArena, program: NodeIndex) -> Vec<StackTraceData> {
        let Some(statements) = arena.block_statements(program) else {
            debug!("root is neither a program nor a block");
            return Vec::new();
        };
        let stack_trace = self.analyze_recursive(arena, statements, 0);
        debug!(calls = stack_trace.len(), "analyzed program");
        stack_trace
    }

    /// Analyze many independent programs in parallel.
    pub fn analyze_programs(&self, programs: &[(&NodeArena, NodeIndex)]) -> Vec<Vec<StackTraceData>> {
        programs
            .par_iter()
            .map(|&(arena, program)| self.analyze(arena, program))
            .collect()
    }

    fn analyze_recursive(
        &self,
        arena: &NodeArena,
        block_scope_body: &[NodeIndex],
        depth: u32,
    ) -> Vec<StackTraceData> {
        let mut stack_trace = Vec::new();
        if block_scope_body.is_empty() {
            return stack_trace;
        }
        if depth >= MAX_STACK_TRACE_DEPTH {
            warn!(depth, "stack trace depth limit reached");
            return stack_trace;
        }

        let limit = limit_index(block_scope_body.len());
        for &root in &block_scope_body[..=limit] {
            let scope = arena.parent(root);
            for (node, _) in arena.pre_order(root) {
                let Some(call) = arena.get_call_expr(node) else {
                    continue;
                };
                if innermost_block_scope(arena, node) != Some(scope) {
                    continue;
                }
                self.analyze_callee(arena, block_scope_body, call.expression, depth, &mut stack_trace);
            }
        }

        stack_trace
    }

    fn analyze_callee(
        &self,
        arena: &NodeArena,
        block_scope_body: &[NodeIndex],
        callee: NodeIndex,
        depth: u32,
        stack_trace: &mut Vec<StackTraceData>,
    ) {
        for extractor in &self.extractors {
            let Some(callee_data) = extractor.extract(arena, block_scope_body, callee) else {
                continue;
            };
            let nested = arena
                .block_statements(callee_data.body)
                .map(|statements| self.analyze_recursive(arena, statements, depth + 1))
                .unwrap_or_default();
            stack_trace.push(StackTraceData {
                name: callee_data.name,
                callee: callee_data.body,
                stack_trace: nested,
            });
        }
    }
}

/// Index of the last statement analyzed in a scope body of `body_length` statements.
///
/// Short bodies are analyzed completely. Past `STACK_TRACE_LIMIT_ACTIVATION_LENGTH`
/// statements, only a small prefix that grows with the body length is.
pub fn limit_index(body_length: usize) -> usize {
    let last_index = body_length.saturating_sub(1);
    let activation_index = STACK_TRACE_LIMIT_ACTIVATION_LENGTH - 1;
    if last_index <= activation_index {
        return last_index;
    }
    let limit =
        (activation_index as f64 + last_index as f64 * STACK_TRACE_LIMIT_THRESHOLD).round() as usize;
    limit.min(last_index)
}
