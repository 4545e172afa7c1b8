//! Command-line surface of the `geosurr` binary.
//!
//! Every command reads delimited matrices, runs one of the surrogate models
//! (or the division correlation) from `geosurr-core`, and writes the result
//! either to a file or, through [`render_summary`], to standard output.

mod commands;

pub use commands::{
    Cli, CliError, CollisionChoice, Command, CommandOutput, CorrelateCommand,
    DEFAULT_DIVISION_COLUMN, EnsembleCommand, ExecutionSummary, GeometricCommand, LabelledOutput,
    LabelledTable, PairedInputs, RewireCommand, RewiringArgs, RuleChoice, ShuffleCommand,
    WeightsArgs, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
