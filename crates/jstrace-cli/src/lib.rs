//! Command line front end for the jstrace call-site analyzer.

pub mod args;
pub mod driver;
pub mod tracing_config;
