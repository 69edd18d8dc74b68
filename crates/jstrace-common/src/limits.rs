//! Centralized limits and thresholds for the call-site analyzer.
//!
//! This module provides shared constants for walk bounds, recursion depths and
//! the statement-count thresholds used by the stack-trace analyzer. Keeping
//! them in one place avoids duplicated definitions with inconsistent values
//! across the parser and analyzer crates.
//!
//! # Categories
//!
//! - **Walk Bounds**: Limits on upward parent walks
//! - **Recursion Depths**: Limits to prevent stack overflow in recursive algorithms
//! - **Stack Trace Thresholds**: Statement-count limits for large scope bodies

// =============================================================================
// Walk Bounds
// =============================================================================

/// Maximum number of parent hops when walking up the tree.
///
/// Used by the block-scope locator. Parent links always form a finite chain
/// for arenas built through the `add_*` methods, but an arena deserialized
/// from untrusted input can carry a parent cycle. The walk stops at this
/// bound instead of spinning forever.
///
/// # JavaScript example
///
/// ```javascript
/// // Each nested function adds two hops (block + function) to the walk:
/// (function () { (function () { (function () { /* ... */ })(); })(); })();
/// ```
pub const MAX_TREE_WALK_ITERATIONS: u32 = 10_000;

// =============================================================================
// Recursion Depths
// =============================================================================

/// Maximum nesting depth accepted by the ESTree importer.
///
/// This is the only depth bound on import: JSON text is parsed without a
/// nesting limit, and the importer rejects anything nested deeper than this
/// many AST nodes with `EstreeImportError::TooDeep`. The importer grows its
/// stack on demand (see `IMPORT_STACK_RED_ZONE`), so the full depth is safe on
/// a 2 MiB rayon worker in debug builds.
///
/// # JavaScript example
///
/// ```javascript
/// // Deeply nested parenthesized calls:
/// f(f(f(f(f(f(f(f(f(f(f(f(/* ... 500 levels ... */))))))))))));
/// ```
pub const MAX_AST_DEPTH: u32 = 500;

/// Stack that must remain before the ESTree importer descends one level.
///
/// When less is left, the next levels run on a freshly allocated segment of
/// `IMPORT_STACK_SEGMENT` bytes. One import level uses a few KiB of stack in
/// debug builds.
pub const IMPORT_STACK_RED_ZONE: usize = 64 * 1024;

/// Size of each stack segment allocated by the ESTree importer.
pub const IMPORT_STACK_SEGMENT: usize = 1024 * 1024;

/// Maximum depth of nested stack-trace analysis.
///
/// Every resolved callee body is analyzed recursively. Resolution always
/// descends into a strictly smaller subtree, so the recursion is finite, but
/// generated code can nest function expressions thousands of levels deep.
/// Bodies past this depth are reported with an empty stack trace.
///
/// # JavaScript example
///
/// ```javascript
/// var a = function () {
///     var b = function () {
///         var c = function () { /* ... */ };
///         c();
///     };
///     b();
/// };
/// a();
/// ```
pub const MAX_STACK_TRACE_DEPTH: u32 = 256;

// =============================================================================
// Stack Trace Thresholds
// =============================================================================

/// Scope bodies with more than this many statements are only partially analyzed.
///
/// Up to this length every statement of a scope body is walked for calls.
pub const STACK_TRACE_LIMIT_ACTIVATION_LENGTH: usize = 10;

/// Fraction of the statements past the activation index that still get analyzed.
///
/// With `last` the index of the final statement, the analyzer stops after
/// index `round(9 + last * 0.002)`. A 1000-statement body is cut off after
/// statement 11; a 10000-statement body after statement 29.
pub const STACK_TRACE_LIMIT_THRESHOLD: f64 = 0.002;
