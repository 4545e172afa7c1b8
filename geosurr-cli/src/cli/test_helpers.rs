//! Builders for CLI test inputs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use geosurr_core::SquareMatrix;
use geosurr_providers_delimited::DelimitedMatrixReader;
use tempfile::TempDir;

use super::{
    Cli, CliError, CollisionChoice, CommandOutput, ExecutionSummary, PairedInputs, RewiringArgs,
    RuleChoice, WeightsArgs, run_cli,
};

/// Edges (0,1)=2 and (2,3)=5 with distances 1..6, labelled `a`..`d`.
pub(super) const TWO_EDGE_WEIGHTS: &str = ",a,b,c,d\n\
    a,0,2,0,0\n\
    b,2,0,0,0\n\
    c,0,0,0,5\n\
    d,0,0,5,0\n";

pub(super) const TWO_EDGE_DISTANCES: &str = "0,1,2,3\n1,0,4,5\n2,4,0,6\n3,5,6,0\n";

/// Complete graph on four nodes with distinct weights.
pub(super) const COMPLETE_WEIGHTS: &str = "0,1,2,3\n1,0,4,5\n2,4,0,6\n3,5,6,0\n";

/// Four nodes per hemisphere: two isocortical, two olfactory.
pub(super) const PARCELLATION: &str = "Acronym,Brain Division\n\
    FRP,Isocortex\n\
    Mop,Isocortex\n\
    MOB,OLF\n\
    AOB,OLF\n";

/// Order-8 matrix text whose entry `(r, c)` is `value(8 * r + c)`.
pub(super) fn hemisphere_matrix(value: impl Fn(u32) -> f64) -> String {
    (0..8_u32)
        .map(|row| {
            let cells: Vec<String> = (0..8_u32)
                .map(|column| value(8 * row + column).to_string())
                .collect();
            format!("{}\n", cells.join(","))
        })
        .collect()
}

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

pub(super) fn weights_args(weights: PathBuf) -> WeightsArgs {
    WeightsArgs {
        weights,
        density: None,
        delimiter: b',',
    }
}

pub(super) fn paired(weights: PathBuf, distances: PathBuf) -> PairedInputs {
    PairedInputs {
        weights: weights_args(weights),
        distances,
    }
}

pub(super) fn seeded_rewiring(seed: u64) -> RewiringArgs {
    RewiringArgs {
        seed: Some(seed),
        max_iterations: None,
        rule: RuleChoice::DistanceRandomizing,
        target_slope: None,
        temperature: 0.0,
        collision: CollisionChoice::Saturated,
        trace_interval: None,
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn stdout_matrix(summary: &ExecutionSummary) -> &SquareMatrix {
    match &summary.output {
        CommandOutput::Stdout(output) => &output.matrix,
        CommandOutput::Table(table) => panic!("expected a matrix, got table {table:?}"),
        CommandOutput::Written(paths) => panic!("expected stdout output, got files {paths:?}"),
    }
}

pub(super) fn read_back(path: &Path) -> SquareMatrix {
    match DelimitedMatrixReader::new().read_path(path) {
        Ok(labelled) => labelled.into_parts().1,
        Err(err) => panic!("failed to read `{}`: {err}", path.display()),
    }
}
