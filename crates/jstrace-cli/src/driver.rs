//! Command execution: loading ESTree files, running the analyzer and shaping
//! the JSON reports.

use crate::args::{CliArgs, Command};
use anyhow::{Context, Result, bail};
use jstrace_analyzer::{
    CalleeData, CalleeDataExtractor, FunctionExpressionCalleeDataExtractor, StackTraceAnalyzer,
    StackTraceData,
};
use jstrace_parser::syntax::innermost_block_scope;
use jstrace_parser::{Node, NodeArena, NodeIndex, import_program_str};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stack trace of one input file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: PathBuf,
    pub stack_trace: Vec<TraceEntry>,
}

/// A stack-trace entry with the source span of the resolved body.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    pub name: Option<String>,
    pub callee: NodeIndex,
    pub pos: u32,
    pub end: u32,
    pub stack_trace: Vec<TraceEntry>,
}

impl TraceEntry {
    fn from_data(arena: &NodeArena, data: StackTraceData) -> TraceEntry {
        let (pos, end) = arena.pos_end(data.callee).unwrap_or_default();
        TraceEntry {
            name: data.name,
            callee: data.callee,
            pos,
            end,
            stack_trace: data
                .stack_trace
                .into_iter()
                .map(|nested| TraceEntry::from_data(arena, nested))
                .collect(),
        }
    }
}

/// Result of `jstrace resolve`.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct CallResolution {
    pub call: NodeIndex,
    pub callee: Option<CalleeData>,
}

/// Run a parsed command line and return the text to print.
pub fn run(args: &CliArgs) -> Result<String> {
    match &args.command {
        Command::Analyze { files } => {
            let reports = analyze_files(files)?;
            to_json(&reports, args.pretty)
        }
        Command::Resolve { file, call } => {
            let (arena, program) = load_program(file)?;
            let resolution = resolve_call(&arena, program, *call)
                .with_context(|| format!("failed to resolve call {call} in {}", file.display()))?;
            to_json(&resolution, args.pretty)
        }
    }
}

/// Read and import an ESTree JSON file.
pub fn load_program(path: &Path) -> Result<(NodeArena, NodeIndex)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let (arena, program) = import_program_str(&text)
        .with_context(|| format!("failed to import ESTree from {}", path.display()))?;
    debug!(file = %path.display(), nodes = arena.len(), "loaded program");
    Ok((arena, program))
}

/// Analyze every file in parallel. Fails on the first unreadable input.
pub fn analyze_files(files: &[PathBuf]) -> Result<Vec<FileReport>> {
    let analyzer = StackTraceAnalyzer::new();
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| analyze_file(&analyzer, path))
        .collect::<Result<_>>()?;
    info!(files = reports.len(), "analysis complete");
    Ok(reports)
}

fn analyze_file(analyzer: &StackTraceAnalyzer, path: &Path) -> Result<FileReport> {
    let (arena, program) = load_program(path)?;
    let stack_trace = analyzer
        .analyze(&arena, program)
        .into_iter()
        .map(|data| TraceEntry::from_data(&arena, data))
        .collect();
    Ok(FileReport {
        file: path.to_path_buf(),
        stack_trace,
    })
}

/// Resolve the callee of the `ordinal`-th call expression of `program`.
///
/// Calls are numbered in pre-order, which is source order for well-formed
/// input. The scope body handed to the resolver is the statement list of the
/// innermost block scope around the call.
pub fn resolve_call(arena: &NodeArena, program: NodeIndex, ordinal: usize) -> Result<CallResolution> {
    let Some(call) = arena
        .pre_order(program)
        .map(|(idx, _)| idx)
        .filter(|&idx| arena.get(idx).is_some_and(Node::is_call_expression))
        .nth(ordinal)
    else {
        bail!("program has no call expression number {ordinal}");
    };
    let callee = arena
        .get_call_expr(call)
        .map_or(NodeIndex::NONE, |data| data.expression);

    let scope_body = innermost_block_scope(arena, call)
        .and_then(|scope| arena.block_statements(scope))
        .unwrap_or_default();

    Ok(CallResolution {
        call,
        callee: FunctionExpressionCalleeDataExtractor.extract(arena, scope_body, callee),
    })
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("failed to serialize output")
}
