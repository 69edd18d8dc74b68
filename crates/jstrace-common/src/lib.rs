//! Common constants for the jstrace call-site analyzer.
//!
//! This crate provides values shared by the parser and analyzer crates:
//! - Walk bounds and recursion limits
//! - Stack-trace analysis thresholds

// Centralized limits and thresholds
pub mod limits;
