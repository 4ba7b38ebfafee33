mod commands;
mod helpers;

use clap::Parser;
use ies_core::{IesError, IesErrorCategory, LayoutError};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const PROGRAM_NAME: &str = "ies-rs";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default
/// `warn` filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

pub fn run_from_env() -> i32 {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error.diagnostic_line());
            error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once(PROGRAM_NAME.to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "ies-rs", version, about = "IES LM-63 photometric file engine")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Parse a file and print its photometric summary
    Inspect(commands::InspectArgs),
    /// Parse a file and write it back as normalized LM-63 text
    Export(commands::ExportArgs),
    /// Compute illuminance at one point from one luminaire
    Illuminance(commands::IlluminanceArgs),
    /// Evaluate a working-plane grid described by a layout file
    Grid(commands::GridArgs),
    /// Inspect every matching file in a directory
    Batch(commands::BatchArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Inspect(args) => commands::run_inspect_command(args),
        CliCommand::Export(args) => commands::run_export_command(args),
        CliCommand::Illuminance(args) => commands::run_illuminance_command(args),
        CliCommand::Grid(args) => commands::run_grid_command(args),
        CliCommand::Batch(args) => commands::run_batch_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Ies(#[from] IesError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn category(&self) -> IesErrorCategory {
        match self {
            Self::Usage(_) => IesErrorCategory::InputValidationError,
            Self::Ies(error) => error.category(),
            Self::Layout(error) => error.category(),
            Self::Internal(_) => IesErrorCategory::IoSystemError,
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            Self::Usage(_) => "INPUT.CLI_USAGE",
            Self::Ies(error) => error.placeholder(),
            Self::Layout(error) => error.placeholder(),
            Self::Internal(_) => "IO.CLI",
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let message = match self {
            Self::Internal(error) => format!("{error:#}"),
            other => other.to_string(),
        };
        format!("ERROR: [{}] {}", self.placeholder(), message.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, run};
    use ies_core::IesError;

    #[test]
    fn unknown_subcommands_are_usage_errors() {
        let error = run(["frobnicate"]).expect_err("unknown command should fail");
        assert!(matches!(error, CliError::Usage(_)));
        assert_eq!(error.exit_code(), 2);
        assert!(error.diagnostic_line().starts_with("ERROR: [INPUT.CLI_USAGE]"));
    }

    #[test]
    fn help_exits_cleanly() {
        assert_eq!(run(["--help"]).expect("help should succeed"), 0);
    }

    #[test]
    fn core_errors_keep_their_placeholders() {
        let error = CliError::from(IesError::malformed_header(3, "no TILT line"));
        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.IES_HEADER] line 3: no TILT line"
        );

        let error = CliError::from(anyhow::anyhow!("disk full").context("writing report"));
        assert_eq!(error.exit_code(), 3);
        assert_eq!(error.diagnostic_line(), "ERROR: [IO.CLI] writing report: disk full");
    }
}
