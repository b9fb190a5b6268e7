//! Command-line interface module.

mod args;
pub mod upload;

pub use args::Cli;
pub use upload::run_batch;
