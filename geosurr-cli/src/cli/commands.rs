//! Argument parsing and command execution for the `geosurr` binary.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use geosurr_core::{
    CollisionPolicy, DEFAULT_MEAN_ORDER, DEFAULT_STD_ORDER, DEFAULT_STRENGTH_ITERATIONS,
    GeneratorBuilder, GeometricModel, GeometricOptions, RewireReport, SquareMatrix,
    SurrogateError, SurrogateErrorCode, SurrogateGenerator, SwapRule, division_correlation,
    to_density,
};
use geosurr_providers_delimited::{
    DelimitedMatrixError, DelimitedMatrixReader, DelimitedMatrixWriter, LabelledMatrix,
};
use thiserror::Error;
use tracing::{Span, debug, field, info, instrument};

/// Top-level options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "geosurr",
    version,
    about = "Generate geometry-aware surrogates of weighted brain graphs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Rewire edges with distance-aware double-edge swaps.
    Rewire(RewireCommand),
    /// Write several independent rewired surrogates to a directory.
    Ensemble(EnsembleCommand),
    /// Keep the weight-distance trend and the strength sequence.
    Geometric(GeometricCommand),
    /// Shuffle weights over the fixed topology, then restore strengths.
    Shuffle(ShuffleCommand),
    /// Spearman-correlate two connectivity matrices per pair of brain
    /// divisions.
    Correlate(CorrelateCommand),
}

impl Command {
    const fn name(&self) -> &'static str {
        match self {
            Self::Rewire(_) => "rewire",
            Self::Ensemble(_) => "ensemble",
            Self::Geometric(_) => "geometric",
            Self::Shuffle(_) => "shuffle",
            Self::Correlate(_) => "correlate",
        }
    }
}

/// Where the weight matrix comes from and how it is read.
#[derive(Debug, Args, Clone)]
pub struct WeightsArgs {
    /// Delimited file holding the symmetric weight matrix.
    #[arg(long)]
    pub weights: PathBuf,

    /// Keep only the strongest percentage of weights before running.
    #[arg(long)]
    pub density: Option<f64>,

    /// Field delimiter of input and output files (a single ASCII character
    /// or `tab`).
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,
}

/// Weight and distance inputs.
#[derive(Debug, Args, Clone)]
pub struct PairedInputs {
    /// Weight matrix options.
    #[command(flatten)]
    pub weights: WeightsArgs,

    /// Delimited file holding the distance matrix.
    #[arg(long)]
    pub distances: PathBuf,
}

/// Acceptance rules selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RuleChoice {
    /// Apply every structurally valid swap.
    DistanceRandomizing,
    /// Steer the weight-distance slope toward `--target-slope`.
    TargetSlope,
}

/// Collision policies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollisionChoice {
    /// Reject colliding proposals.
    Reject,
    /// Exchange weights in place only when no vacant slot exists.
    Saturated,
    /// Exchange weights in place on every collision.
    Always,
}

impl From<CollisionChoice> for CollisionPolicy {
    fn from(choice: CollisionChoice) -> Self {
        match choice {
            CollisionChoice::Reject => Self::Reject,
            CollisionChoice::Saturated => Self::ExchangeWhenSaturated,
            CollisionChoice::Always => Self::ExchangeOnCollision,
        }
    }
}

/// Swap loop configuration shared by `rewire` and `ensemble`.
#[derive(Debug, Args, Clone)]
pub struct RewiringArgs {
    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Upper bound on swap attempts (default: ten per edge).
    #[arg(long = "max-iterations")]
    pub max_iterations: Option<usize>,

    /// Acceptance rule.
    #[arg(long, value_enum, default_value_t = RuleChoice::DistanceRandomizing)]
    pub rule: RuleChoice,

    /// Desired slope of weight against distance for `--rule target-slope`.
    #[arg(long = "target-slope", allow_negative_numbers = true)]
    pub target_slope: Option<f64>,

    /// Metropolis temperature for `--rule target-slope`; zero is greedy.
    #[arg(long, default_value_t = 0.0)]
    pub temperature: f64,

    /// Handling of proposals whose target slots already hold weights.
    #[arg(long, value_enum, default_value_t = CollisionChoice::Saturated)]
    pub collision: CollisionChoice,

    /// Log the weight-distance correlation every N attempts.
    #[arg(long = "trace-interval")]
    pub trace_interval: Option<NonZeroUsize>,
}

impl RewiringArgs {
    fn swap_rule(&self) -> Result<SwapRule, CliError> {
        match self.rule {
            RuleChoice::DistanceRandomizing => Ok(SwapRule::DistanceRandomizing),
            RuleChoice::TargetSlope => {
                let slope = self.target_slope.ok_or(CliError::MissingTargetSlope)?;
                Ok(SwapRule::TargetSlope {
                    slope,
                    temperature: self.temperature,
                })
            }
        }
    }

    fn generator(&self) -> Result<SurrogateGenerator, CliError> {
        let mut builder = GeneratorBuilder::new()
            .with_swap_rule(self.swap_rule()?)
            .with_collision_policy(self.collision.into());
        if let Some(seed) = self.seed {
            builder = builder.with_random_seed(seed);
        }
        if let Some(iterations) = self.max_iterations {
            builder = builder.with_max_iterations(iterations);
        }
        if let Some(interval) = self.trace_interval {
            builder = builder.with_trace_interval(interval);
        }
        Ok(builder.build()?)
    }
}

/// Options accepted by `rewire`.
#[derive(Debug, Args, Clone)]
pub struct RewireCommand {
    /// Input matrices.
    #[command(flatten)]
    pub inputs: PairedInputs,

    /// Swap loop configuration.
    #[command(flatten)]
    pub rewiring: RewiringArgs,

    /// Destination file; standard output when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Options accepted by `ensemble`.
#[derive(Debug, Args, Clone)]
pub struct EnsembleCommand {
    /// Input matrices.
    #[command(flatten)]
    pub inputs: PairedInputs,

    /// Swap loop configuration; the seed is the ensemble's base seed.
    #[command(flatten)]
    pub rewiring: RewiringArgs,

    /// Number of surrogates to generate.
    #[arg(long)]
    pub count: NonZeroUsize,

    /// Directory receiving one file per surrogate.
    #[arg(long = "output-dir")]
    pub output_dir: PathBuf,
}

/// Options accepted by `geometric`.
#[derive(Debug, Args, Clone)]
pub struct GeometricCommand {
    /// Input matrices; empty or `nan` distance cells mark missing pairs.
    #[command(flatten)]
    pub inputs: PairedInputs,

    /// Degree of the log-weight trend polynomial.
    #[arg(long = "mean-order", default_value_t = DEFAULT_MEAN_ORDER)]
    pub mean_order: usize,

    /// Degree of the residual spread polynomial.
    #[arg(long = "std-order", default_value_t = DEFAULT_STD_ORDER)]
    pub std_order: usize,

    /// Strength correction repetitions.
    #[arg(long = "strength-iterations", default_value_t = DEFAULT_STRENGTH_ITERATIONS)]
    pub strength_iterations: usize,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Destination file; standard output when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Options accepted by `shuffle`.
#[derive(Debug, Args, Clone)]
pub struct ShuffleCommand {
    /// Weight matrix options.
    #[command(flatten)]
    pub weights: WeightsArgs,

    /// Strength correction repetitions.
    #[arg(long = "strength-iterations", default_value_t = DEFAULT_STRENGTH_ITERATIONS)]
    pub strength_iterations: usize,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Destination file; standard output when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Options accepted by `correlate`.
#[derive(Debug, Args, Clone)]
pub struct CorrelateCommand {
    /// First hemisphere-symmetric connectivity matrix.
    #[arg(long)]
    pub first: PathBuf,

    /// Second connectivity matrix, of the same order.
    #[arg(long)]
    pub second: PathBuf,

    /// Delimited table with a header row and one row per node of one
    /// hemisphere.
    #[arg(long)]
    pub parcellation: PathBuf,

    /// Parcellation column naming each node's brain division.
    #[arg(long = "division-column", default_value = DEFAULT_DIVISION_COLUMN)]
    pub division_column: String,

    /// Field delimiter of input and output files (a single ASCII character
    /// or `tab`).
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Destination file; standard output when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Parcellation header read by `correlate` unless `--division-column` is
/// given.
pub const DEFAULT_DIVISION_COLUMN: &str = "Brain Division";

/// Errors surfaced while executing commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be opened or created.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// `--rule target-slope` was given without `--target-slope`.
    #[error("`--rule target-slope` requires `--target-slope`")]
    MissingTargetSlope,
    /// Weight and distance files label the same position differently.
    #[error(
        "node {position} is labelled `{weights}` in the weights but `{distances}` in the distances"
    )]
    LabelMismatch {
        /// Zero-based node position.
        position: usize,
        /// Label from the weight file.
        weights: String,
        /// Label from the distance file.
        distances: String,
    },
    /// Reading or writing a matrix failed.
    #[error(transparent)]
    Delimited(#[from] DelimitedMatrixError),
    /// Surrogate generation failed.
    #[error(transparent)]
    Core(#[from] SurrogateError),
}

impl CliError {
    /// Returns the stable code of the underlying surrogate error, if any.
    #[must_use]
    pub fn core_code(&self) -> Option<SurrogateErrorCode> {
        match self {
            Self::Core(err) | Self::Delimited(DelimitedMatrixError::Matrix(err)) => {
                Some(err.code())
            }
            _ => None,
        }
    }
}

/// A surrogate matrix with the node labels of its input.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledOutput {
    /// Surrogate weights.
    pub matrix: SquareMatrix,
    /// Node labels carried over from the weight file.
    pub labels: Option<Vec<String>>,
    /// Delimiter to write with.
    pub delimiter: u8,
}

/// A labelled rectangular table of results.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledTable {
    /// One label per row.
    pub rows: Vec<String>,
    /// One label per column.
    pub columns: Vec<String>,
    /// Row-major values; NaN marks an undefined cell.
    pub values: Vec<Vec<f64>>,
    /// Delimiter to write with.
    pub delimiter: u8,
}

/// Where a command's matrices ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// Matrix still to be written to standard output.
    Stdout(LabelledOutput),
    /// Table still to be written to standard output.
    Table(LabelledTable),
    /// Files already written.
    Written(Vec<PathBuf>),
}

/// Summarises one command execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Name of the command that ran.
    pub command: &'static str,
    /// Produced matrices.
    pub output: CommandOutput,
    /// Rewiring statistics, one per surrogate; empty for `geometric` and
    /// `shuffle`.
    pub reports: Vec<RewireReport>,
}

/// Executes the command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when an input cannot be read, generation fails, or an
/// output cannot be written.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use geosurr_cli::cli::{Cli, Command, CommandOutput, ShuffleCommand, WeightsArgs, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0,1,2\n1,0,3\n2,3,0\n")?;
/// let cli = Cli {
///     command: Command::Shuffle(ShuffleCommand {
///         weights: WeightsArgs {
///             weights: file.path().to_path_buf(),
///             density: None,
///             delimiter: b',',
///         },
///         strength_iterations: 9,
///         seed: Some(3),
///         output: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert!(matches!(summary.output, CommandOutput::Stdout(_)));
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    Span::current().record("command", cli.command.name());
    let summary = match cli.command {
        Command::Rewire(command) => run_rewire(command),
        Command::Ensemble(command) => run_ensemble(command),
        Command::Geometric(command) => run_geometric(command),
        Command::Shuffle(command) => run_shuffle(command),
        Command::Correlate(command) => run_correlate(command),
    }?;
    info!(
        command = summary.command,
        surrogates = summary.reports.len().max(1),
        "command completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.rewire",
    err,
    skip(command),
    fields(seed = ?command.rewiring.seed, rule = ?command.rewiring.rule),
)]
pub(super) fn run_rewire(command: RewireCommand) -> Result<ExecutionSummary, CliError> {
    let generator = command.rewiring.generator()?;
    let ((labels, weights), distances) = load_pair(&command.inputs, false)?;
    let surrogate = generator.generate(&weights, &distances)?;
    let (matrix, report) = surrogate.into_parts();
    log_report(0, &report);

    let output = LabelledOutput {
        matrix,
        labels,
        delimiter: command.inputs.weights.delimiter,
    };
    Ok(ExecutionSummary {
        command: "rewire",
        output: deliver(output, command.output)?,
        reports: vec![report],
    })
}

#[instrument(
    name = "cli.ensemble",
    err,
    skip(command),
    fields(count = command.count.get(), output_dir = %command.output_dir.display()),
)]
pub(super) fn run_ensemble(command: EnsembleCommand) -> Result<ExecutionSummary, CliError> {
    let generator = command.rewiring.generator()?;
    let ((labels, weights), distances) = load_pair(&command.inputs, false)?;
    let members = generator.ensemble(&weights, &distances, command.count.get())?;

    fs::create_dir_all(&command.output_dir).map_err(|source| CliError::Io {
        path: command.output_dir.clone(),
        source,
    })?;
    let writer = DelimitedMatrixWriter::new().with_delimiter(command.inputs.weights.delimiter);
    let mut written = Vec::with_capacity(members.len());
    let mut reports = Vec::with_capacity(members.len());
    for (index, member) in members.into_iter().enumerate() {
        let (matrix, report) = member.into_parts();
        log_report(index, &report);
        let path = command
            .output_dir
            .join(member_file_name(index, command.count.get()));
        write_matrix(&writer, &path, &matrix, labels.as_deref())?;
        written.push(path);
        reports.push(report);
    }
    Ok(ExecutionSummary {
        command: "ensemble",
        output: CommandOutput::Written(written),
        reports,
    })
}

#[instrument(
    name = "cli.geometric",
    err,
    skip(command),
    fields(mean_order = command.mean_order, std_order = command.std_order),
)]
pub(super) fn run_geometric(command: GeometricCommand) -> Result<ExecutionSummary, CliError> {
    let model = geometric_model(
        command.strength_iterations,
        command.seed,
        Some((command.mean_order, command.std_order)),
    )?;
    let ((labels, weights), distances) = load_pair(&command.inputs, true)?;
    let matrix = model.geometric(&weights, &distances)?;
    let output = LabelledOutput {
        matrix,
        labels,
        delimiter: command.inputs.weights.delimiter,
    };
    Ok(ExecutionSummary {
        command: "geometric",
        output: deliver(output, command.output)?,
        reports: Vec::new(),
    })
}

#[instrument(name = "cli.shuffle", err, skip(command), fields(seed = ?command.seed))]
pub(super) fn run_shuffle(command: ShuffleCommand) -> Result<ExecutionSummary, CliError> {
    let model = geometric_model(command.strength_iterations, command.seed, None)?;
    let (labels, weights) = load_weights(&command.weights)?;
    let matrix = model.shuffled(&weights)?;
    let output = LabelledOutput {
        matrix,
        labels,
        delimiter: command.weights.delimiter,
    };
    Ok(ExecutionSummary {
        command: "shuffle",
        output: deliver(output, command.output)?,
        reports: Vec::new(),
    })
}

#[instrument(
    name = "cli.correlate",
    err,
    skip(command),
    fields(division_column = %command.division_column),
)]
pub(super) fn run_correlate(command: CorrelateCommand) -> Result<ExecutionSummary, CliError> {
    let reader = DelimitedMatrixReader::new().with_delimiter(command.delimiter);
    let divisions = read_divisions(&reader, &command.parcellation, &command.division_column)?;
    let (_, first) = read_matrix(&reader, &command.first)?.into_parts();
    let (_, second) = read_matrix(&reader, &command.second)?.into_parts();
    let correlation = division_correlation(&first, &second, &divisions)?;
    info!(
        divisions = correlation.divisions().len(),
        "division correlation computed"
    );

    let table = LabelledTable {
        rows: correlation
            .divisions()
            .iter()
            .map(|name| (*name).to_owned())
            .collect(),
        columns: correlation.column_labels(),
        values: correlation.to_rows(),
        delimiter: command.delimiter,
    };
    let output = match command.output {
        Some(path) => {
            let file = File::create(&path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            DelimitedMatrixWriter::new()
                .with_delimiter(table.delimiter)
                .write_table(file, &table.rows, &table.columns, &table.values)?;
            info!(path = %path.display(), "correlation table written");
            CommandOutput::Written(vec![path])
        }
        None => CommandOutput::Table(table),
    };
    Ok(ExecutionSummary {
        command: "correlate",
        output,
        reports: Vec::new(),
    })
}

#[instrument(name = "cli.read_divisions", err, skip(reader), fields(path = %path.display()))]
fn read_divisions(
    reader: &DelimitedMatrixReader,
    path: &Path,
    column: &str,
) -> Result<Vec<String>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(reader.read_column(BufReader::new(file), column)?)
}

fn geometric_model(
    strength_iterations: usize,
    seed: Option<u64>,
    orders: Option<(usize, usize)>,
) -> Result<GeometricModel, CliError> {
    let mut options = GeometricOptions::new().with_strength_iterations(strength_iterations);
    if let Some((mean_order, std_order)) = orders {
        options = options
            .with_mean_order(mean_order)
            .with_std_order(std_order);
    }
    if let Some(seed) = seed {
        options = options.with_random_seed(seed);
    }
    Ok(options.build()?)
}

type Weights = (Option<Vec<String>>, SquareMatrix);

/// Empty distance cells are read as missing pairs when `missing_distances`
/// is set; otherwise they are errors.
fn load_pair(
    inputs: &PairedInputs,
    missing_distances: bool,
) -> Result<(Weights, SquareMatrix), CliError> {
    let (labels, weights) = load_weights(&inputs.weights)?;
    let reader = DelimitedMatrixReader::new()
        .with_delimiter(inputs.weights.delimiter)
        .with_missing_as_nan(missing_distances);
    let (distance_labels, distances) = read_matrix(&reader, &inputs.distances)?.into_parts();
    if let (Some(left), Some(right)) = (&labels, &distance_labels) {
        check_labels(left, right)?;
    }
    Ok(((labels, weights), distances))
}

fn load_weights(args: &WeightsArgs) -> Result<Weights, CliError> {
    let reader = DelimitedMatrixReader::new().with_delimiter(args.delimiter);
    let (labels, weights) = read_matrix(&reader, &args.weights)?.into_parts();
    let weights = match args.density {
        Some(density) => to_density(&weights, density)?,
        None => weights,
    };
    Ok((labels, weights))
}

/// Reports the first position where two label sets disagree.
///
/// Sets of different lengths are left to the shape checks in core.
pub(super) fn check_labels(weights: &[String], distances: &[String]) -> Result<(), CliError> {
    match weights
        .iter()
        .zip(distances)
        .position(|(left, right)| left != right)
    {
        Some(position) => Err(CliError::LabelMismatch {
            position,
            weights: weights[position].clone(),
            distances: distances[position].clone(),
        }),
        None => Ok(()),
    }
}

#[instrument(name = "cli.read_matrix", err, skip(reader), fields(path = %path.display()))]
fn read_matrix(reader: &DelimitedMatrixReader, path: &Path) -> Result<LabelledMatrix, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(reader.read(BufReader::new(file))?)
}

fn write_matrix(
    writer: &DelimitedMatrixWriter,
    path: &Path,
    matrix: &SquareMatrix,
    labels: Option<&[String]>,
) -> Result<(), CliError> {
    let file = File::create(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write(file, matrix, labels)?;
    Ok(())
}

fn deliver(output: LabelledOutput, path: Option<PathBuf>) -> Result<CommandOutput, CliError> {
    let Some(path) = path else {
        return Ok(CommandOutput::Stdout(output));
    };
    let writer = DelimitedMatrixWriter::new().with_delimiter(output.delimiter);
    write_matrix(&writer, &path, &output.matrix, output.labels.as_deref())?;
    info!(path = %path.display(), "surrogate written");
    Ok(CommandOutput::Written(vec![path]))
}

/// `surrogate_007.csv`, zero-padded to the width of the largest index.
pub(super) fn member_file_name(index: usize, count: usize) -> String {
    let width = count.saturating_sub(1).max(1).to_string().len();
    format!("surrogate_{index:0width$}.csv")
}

fn log_report(member: usize, report: &RewireReport) {
    info!(
        member,
        edges = report.edges,
        attempts = report.attempts,
        accepted = report.accepted(),
        initial_pearson = ?report.initial.and_then(|sample| sample.pearson),
        final_pearson = ?report.last.and_then(|sample| sample.pearson),
        "surrogate generated"
    );
    for sample in &report.trace {
        debug!(
            member,
            iteration = sample.iteration,
            pearson = ?sample.pearson,
            slope = ?sample.slope,
            "correlation sample"
        );
    }
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    if raw.eq_ignore_ascii_case("tab") || raw == "\\t" {
        return Ok(b'\t');
    }
    match raw.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!(
            "delimiter must be one ASCII character or `tab` (got `{raw}`)"
        )),
    }
}

/// Writes a pending standard-output matrix or table to `writer`; written
/// files need no rendering.
///
/// # Errors
/// Returns [`DelimitedMatrixError`] when writing fails.
///
/// # Examples
/// ```
/// # use geosurr_cli::cli::{CommandOutput, ExecutionSummary, LabelledOutput, render_summary};
/// # use geosurr_core::SquareMatrix;
/// #
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = ExecutionSummary {
///     command: "shuffle",
///     output: CommandOutput::Stdout(LabelledOutput {
///         matrix: SquareMatrix::try_from_rows(vec![vec![0.0, 1.5], vec![1.5, 0.0]])?,
///         labels: None,
///         delimiter: b',',
///     }),
///     reports: Vec::new(),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "0,1.5\n1.5,0\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(
    summary: &ExecutionSummary,
    writer: impl io::Write,
) -> Result<(), DelimitedMatrixError> {
    match &summary.output {
        CommandOutput::Stdout(output) => DelimitedMatrixWriter::new()
            .with_delimiter(output.delimiter)
            .write(writer, &output.matrix, output.labels.as_deref()),
        CommandOutput::Table(table) => DelimitedMatrixWriter::new()
            .with_delimiter(table.delimiter)
            .write_table(writer, &table.rows, &table.columns, &table.values),
        CommandOutput::Written(_) => Ok(()),
    }
}
