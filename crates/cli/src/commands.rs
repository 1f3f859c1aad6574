//! CLI commands

use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Subcommand, ValueEnum};
use flashsale::{Format, decode, encode};
use tracing::info;

use crate::errors::CliError;

/// Path standing for stdin or stdout.
const STDIO: &str = "-";

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Re-encode a record in another format.
    Convert(ConvertArgs),

    /// Decode a record and print its fields.
    Inspect(InspectArgs),
}

/// Wire format selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum FormatArg {
    /// BSON document-store format.
    #[value(alias = "bson")]
    Document,

    /// JSON interchange format.
    #[value(alias = "json")]
    Interchange,
}

impl From<FormatArg> for Format {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Document => Self::Document,
            FormatArg::Interchange => Self::Interchange,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ConvertArgs {
    /// Format of the input record
    #[arg(long, value_enum)]
    pub from: FormatArg,

    /// Format to write the record in
    #[arg(long, value_enum)]
    pub to: FormatArg,

    /// Input file, `-` for stdin
    #[arg(default_value = STDIO)]
    pub input: PathBuf,

    /// Output file, `-` for stdout
    #[arg(short, long, default_value = STDIO)]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub(crate) struct InspectArgs {
    /// Format of the input record
    #[arg(long, value_enum)]
    pub format: FormatArg,

    /// Input file, `-` for stdin
    #[arg(default_value = STDIO)]
    pub input: PathBuf,

    /// Output file, `-` for stdout
    #[arg(short, long, default_value = STDIO)]
    pub output: PathBuf,
}

pub(crate) fn run(command: &Command) -> Result<(), CliError> {
    match command {
        Command::Convert(args) => convert(args),
        Command::Inspect(args) => inspect(args),
    }
}

fn convert(args: &ConvertArgs) -> Result<(), CliError> {
    let (from, to) = (Format::from(args.from), Format::from(args.to));

    let record = decode(from, &read_input(&args.input)?)?;
    let encoded = encode(to, &record)?;

    write_output(&args.output, &encoded)?;

    info!(%from, %to, bytes = encoded.len(), "converted flashsale record");

    Ok(())
}

fn inspect(args: &InspectArgs) -> Result<(), CliError> {
    let record = decode(args.format.into(), &read_input(&args.input)?)?;

    write_output(&args.output, format!("{record:#?}\n").as_bytes())
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO
}

fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    let read = || -> io::Result<Vec<u8>> {
        if is_stdio(path) {
            let mut bytes = Vec::new();
            io::stdin().lock().read_to_end(&mut bytes)?;
            Ok(bytes)
        } else {
            fs::read(path)
        }
    };

    read().map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    let write = || -> io::Result<()> {
        if is_stdio(path) {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()
        } else {
            fs::write(path, bytes)
        }
    };

    write().map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}
