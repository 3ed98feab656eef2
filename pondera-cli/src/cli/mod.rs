//! Command-line interface orchestration for the pondera CLI.
//!
//! The CLI offers a single `run` command that loads a CSV of weighted planar
//! points and executes the capacity-constrained clustering pipeline.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, ExponentArg, RunCommand, render_summary, run_cli,
};
