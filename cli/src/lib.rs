//! text-search command-line library
//!
//! Argument parsing, result rendering and the run loop behind the
//! `text-search` binary.

pub mod args;
pub mod output;
pub mod runner;

pub use args::Args;
pub use output::{Output, Report};
pub use runner::{report_error, run};
