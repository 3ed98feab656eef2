//! Command implementations and argument parsing for the pondera CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use pondera_core::{ClusteringResult, Point, PonderaBuilder, PonderaError, WeightExponent};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_SECTOR_SCALE: f64 = 1.0;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "pondera",
    about = "Cluster weighted planar points under a capacity budget."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Execute the clustering pipeline against a CSV point file.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to a CSV file with one `x,y,weight` row per point.
    pub path: PathBuf,

    /// Capacity budget bounding the total weight of any merged cluster.
    #[arg(long)]
    pub budget: f64,

    /// Minimum sector scale dividing raw Euclidean distances.
    #[arg(long = "sector-scale", default_value_t = DEFAULT_SECTOR_SCALE)]
    pub sector_scale: f64,

    /// Weight exponent variant used by the distance metric.
    #[arg(long, value_enum, default_value = "one-plus-sum")]
    pub exponent: ExponentArg,

    /// Print one label per line instead of the full summary.
    #[arg(long)]
    pub labels_only: bool,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Distance exponent variants selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExponentArg {
    /// Exponent is `1 + weight_a + weight_b`.
    OnePlusSum,
    /// Exponent is `weight_a + weight_b`.
    Sum,
}

impl From<ExponentArg> for WeightExponent {
    fn from(arg: ExponentArg) -> Self {
        match arg {
            ExponentArg::OnePlusSum => Self::OnePlusSum,
            ExponentArg::Sum => Self::Sum,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading the point file.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A CSV row could not be parsed into a weighted point.
    #[error("`{path}` line {line}: {message}")]
    Malformed {
        /// Path of the offending file.
        path: PathBuf,
        /// One-based line number of the offending row.
        line: usize,
        /// Description of the parse failure.
        message: String,
    },
    /// Core clustering failed.
    #[error(transparent)]
    Core(#[from] PonderaError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported for the input file.
    pub data_source: String,
    /// Number of points loaded from the file.
    pub points: usize,
    /// Labels produced by the clustering pipeline.
    pub result: ClusteringResult,
    /// Render bare labels instead of the full summary.
    pub labels_only: bool,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when parsing or execution fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use pondera_cli::cli::{Cli, Command, ExponentArg, RunCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0.0,0.0,0.1\n50.0,50.0,0.1\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         path: file.path().to_path_buf(),
///         budget: 0.1,
///         sector_scale: 1.0,
///         exponent: ExponentArg::OnePlusSum,
///         labels_only: false,
///         name: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.result.labels().len(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(path = field::Empty, budget = field::Empty, sector_scale = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("path", field::display(command.path.display()));
    span.record("budget", field::display(command.budget));
    span.record("sector_scale", field::display(command.sector_scale));

    let pondera = PonderaBuilder::new()
        .with_capacity_budget(command.budget)
        .with_sector_scale(command.sector_scale)
        .with_weight_exponent(command.exponent.into())
        .build()?;

    let data_source = derive_data_source_name(&command.path, command.name.as_deref());
    let reader = open_point_reader(&command.path)?;
    let points = read_points(reader, &command.path)?;
    let result = pondera.label(&points)?;

    info!(
        data_source = data_source.as_str(),
        points = points.len(),
        clusters = result.cluster_count(),
        "command completed"
    );
    Ok(ExecutionSummary {
        data_source,
        points: points.len(),
        result,
        labels_only: command.labels_only,
    })
}

#[instrument(name = "cli.open_point_reader", err, fields(path = field::Empty))]
pub(super) fn open_point_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Parses `x,y,weight` rows into points.
///
/// Blank lines and `#` comments are skipped. A leading non-numeric row is
/// tolerated as a column header; any later malformed row is an error.
pub(super) fn read_points(reader: impl BufRead, path: &Path) -> Result<Vec<Point>, CliError> {
    let mut points = Vec::new();
    let mut saw_data = false;
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let row = line.trim();
        if row.is_empty() || row.starts_with('#') {
            continue;
        }
        match parse_row(row) {
            Ok(point) => {
                points.push(point);
                saw_data = true;
            }
            Err(message) => {
                if !saw_data && points.is_empty() {
                    // Header row.
                    saw_data = true;
                    continue;
                }
                return Err(CliError::Malformed {
                    path: path.to_path_buf(),
                    line: index + 1,
                    message,
                });
            }
        }
    }
    Ok(points)
}

fn parse_row(row: &str) -> Result<Point, String> {
    let fields: Vec<&str> = row.split(',').map(str::trim).collect();
    let [x, y, weight] = fields.as_slice() else {
        return Err(format!("expected 3 fields, found {}", fields.len()));
    };
    let x: f64 = x.parse().map_err(|_| format!("invalid x value `{x}`"))?;
    let y: f64 = y.parse().map_err(|_| format!("invalid y value `{y}`"))?;
    let weight: f64 = weight
        .parse()
        .map_err(|_| format!("invalid weight value `{weight}`"))?;
    Ok(Point::new(x, y, weight))
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "points".to_owned())
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use pondera_cli::cli::{ExecutionSummary, render_summary};
/// # use pondera_core::{Point, PonderaBuilder};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let points = vec![Point::new(0.0, 0.0, 1.0), Point::new(9.0, 9.0, 1.0)];
/// let result = PonderaBuilder::new()
///     .with_capacity_budget(0.5)
///     .build()?
///     .label(&points)?;
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     points: 2,
///     result,
///     labels_only: true,
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer.into_inner())?, "0\n1\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    if summary.labels_only {
        for label in summary.result.labels() {
            writeln!(writer, "{}", label.get())?;
        }
        return Ok(());
    }
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "points: {}", summary.points)?;
    writeln!(writer, "clusters: {}", summary.result.cluster_count())?;
    for (index, label) in summary.result.labels().iter().enumerate() {
        writeln!(writer, "{index}\t{}", label.get())?;
    }
    Ok(())
}
