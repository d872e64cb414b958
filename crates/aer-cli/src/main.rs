/// Atmosphere world command-line tool: inspect, dump, and convert
/// legacy `.aer` world containers.
///
/// # Command overview
///
/// ```text
/// aer <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    List raw chunks without decoding their fields
///   dump       Decode every chunk and print fields plus the URL set
///   convert    Write an X3D scene (or an HTML page) next to the input
///   urls       Print only the referenced-URL set
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Enable debug logging on stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// All error details go to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd_convert;
mod cmd_dump;
mod cmd_inspect;
mod cmd_urls;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The Atmosphere world command-line tool.
#[derive(Parser)]
#[command(name = "aer", version, about = "Atmosphere world file CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// List raw chunks (index, type code, id, data size) without decoding.
    Inspect(InspectArgs),
    /// Decode every chunk and print fields, warnings, and the URL set.
    Dump(DumpArgs),
    /// Convert a world to an X3D scene document or an HTML page.
    Convert(ConvertArgs),
    /// Print the deduplicated, sorted URL set only.
    Urls(UrlsArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `aer inspect`.
///
/// Splits the container's payload into chunks and prints a one-line
/// summary per chunk. Field data is left undecoded; `--preview` adds
/// the first bytes of each chunk's data with non-printable bytes
/// escaped, which is handy when probing unknown type codes.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the `.aer` container to inspect.
    pub file: PathBuf,

    /// Show the first 24 bytes of each chunk's data, escaped.
    #[arg(long)]
    pub preview: bool,
}

/// Arguments for `aer dump`.
///
/// Runs the full decode pipeline and prints every record's fields in
/// tag order, any per-record warnings, and the final URL set.
#[derive(clap::Args)]
pub struct DumpArgs {
    /// Path to the `.aer` container to dump.
    pub file: PathBuf,
}

/// Arguments for `aer convert`.
///
/// Decodes the world and writes a scene document next to the input
/// (`<base>.x3d` by default, `<base>.html` with `--html`), or to the
/// path given with `-o`.
#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Path to the `.aer` container to convert.
    pub file: PathBuf,

    /// Emit an HTML page embedding the scene instead of bare X3D.
    #[arg(long)]
    pub html: bool,

    /// Write to this path instead of deriving one from the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `aer urls`.
#[derive(clap::Args)]
pub struct UrlsArgs {
    /// Path to the `.aer` container to read.
    pub file: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Dump(args) => cmd_dump::run(&args),
        Commands::Convert(args) => cmd_convert::run(&args),
        Commands::Urls(args) => cmd_urls::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
