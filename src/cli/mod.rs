//! CLI module
//!
//! Provides command-line interface for:
//! - serve: Load the model and serve HTTP until Ctrl+C
//! - predict: Score one record read from stdin
//! - encode: Show the feature vector for one record, without a model
//! - check: Validate config and model artifact, then exit

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, encode, predict, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
