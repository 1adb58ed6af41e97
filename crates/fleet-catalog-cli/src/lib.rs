#![forbid(unsafe_code)]

mod catalog_actions;
mod helpers;
mod logging;

use catalog_actions::{GalleryMoves, Session};
use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Generator, Shell};
use fleet_catalog_core::{ConfigError, ExitCode, MachineError};
use fleet_catalog_export::{ExportError, ExportErrorCode};
use fleet_catalog_model::{CatalogFilter, Category, ItemId};
use fleet_catalog_store::{StoreError, StoreErrorCode};
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

const FLEET_HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "fleet-catalog", version)]
#[command(about = "Rental fleet catalog: edit media, back up, export and publish")]
#[command(help_template = FLEET_HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  FLEET_LOG_LEVEL     Log filter override\n  FLEET_LOG_JSON      Emit JSON log lines on stderr\n  FLEET_STORAGE_DIR   Directory holding the persisted collection\n  FLEET_SEED_PATH     Seed dataset JSON\n  FLEET_OUTPUT_DIR    Default directory for exports"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long, global = true, default_value_t = false)]
    trace: bool,
    /// Explicit configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    seed: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration and paths.
    Config,
    /// List the items of one category, optionally narrowed by brand and type.
    List {
        #[arg(long, default_value = "vehiculos")]
        category: Category,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
    },
    /// Distinct brands and types of a category.
    Facets {
        #[arg(long, default_value = "vehiculos")]
        category: Category,
    },
    /// Detail view of one item with its gallery position.
    Show {
        id: ItemId,
        #[arg(long, default_value_t = 0)]
        image_index: usize,
        #[arg(long, action = ArgAction::Count)]
        next: u8,
        #[arg(long, action = ArgAction::Count)]
        prev: u8,
    },
    /// Replace an item's cover image with a local file.
    SetImage { id: ItemId, file: PathBuf },
    /// Attach a technical sheet (PDF or image) to an item.
    SetSheet { id: ItemId, file: PathBuf },
    /// Write a dated backup of the working collection.
    Backup {
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Replace the whole working collection with a backup file.
    Restore {
        file: PathBuf,
        /// Confirm replacing every item.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Export the whole catalog as a spreadsheet.
    ExportXlsx {
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Export one item's datasheet as PDF.
    ExportPdf {
        id: ItemId,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Generate the portable HTML snapshot.
    Publish {
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy)]
struct LogFlags {
    quiet: bool,
    verbose: u8,
    trace: bool,
}

#[derive(Clone, Copy)]
struct OutputMode {
    json: bool,
}

/// Global path overrides given on the command line.
struct PathOverrides {
    config: Option<PathBuf>,
    storage_dir: Option<PathBuf>,
    seed: Option<PathBuf>,
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code as u8)
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError::usage("invalid command line arguments")
                    .with_detail("error", &err.to_string()));
            }
        },
    };
    let output_mode = OutputMode { json: cli.json };
    logging::init_tracing(LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
        trace: cli.trace,
    });

    let command = cli
        .command
        .ok_or_else(|| CliError::usage("missing command; see --help"))?;
    let overrides = PathOverrides {
        config: cli.config,
        storage_dir: cli.storage_dir,
        seed: cli.seed,
    };
    let session = || Session::load(&overrides);

    match command {
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(())
        }
        Commands::Config => catalog_actions::show_config(&session()?, output_mode),
        Commands::List {
            category,
            brand,
            kind,
        } => catalog_actions::list_items(
            &session()?,
            &CatalogFilter::new(category).with_brand(brand).with_kind(kind),
            output_mode,
        ),
        Commands::Facets { category } => {
            catalog_actions::show_facets(&session()?, category, output_mode)
        }
        Commands::Show {
            id,
            image_index,
            next,
            prev,
        } => catalog_actions::show_item(
            &session()?,
            id,
            GalleryMoves {
                start: image_index,
                next,
                prev,
            },
            output_mode,
        ),
        Commands::SetImage { id, file } => {
            catalog_actions::set_image(&session()?, id, &file, output_mode)
        }
        Commands::SetSheet { id, file } => {
            catalog_actions::set_sheet(&session()?, id, &file, output_mode)
        }
        Commands::Backup { out_dir } => {
            catalog_actions::write_backup(&session()?, out_dir, output_mode)
        }
        Commands::Restore { file, yes } => {
            if !yes {
                return Err(CliError::usage(
                    "restore replaces every item in the catalog; pass --yes to confirm",
                ));
            }
            catalog_actions::restore_backup(&session()?, &file, output_mode)
        }
        Commands::ExportXlsx { out_dir } => {
            catalog_actions::export_xlsx(&session()?, out_dir, output_mode)
        }
        Commands::ExportPdf { id, out_dir } => {
            catalog_actions::export_pdf(&session()?, id, out_dir, output_mode)
        }
        Commands::Publish { out_dir } => {
            catalog_actions::publish_snapshot(&session()?, out_dir, output_mode)
        }
    }
}

fn print_completion<G: Generator>(generator: G) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(generator, &mut command, name, &mut std::io::stdout());
}

#[derive(Debug)]
struct CliError {
    exit_code: ExitCode,
    machine: MachineError,
}

impl CliError {
    fn usage(message: &str) -> Self {
        Self {
            exit_code: ExitCode::Usage,
            machine: MachineError::new("usage_error", message),
        }
    }

    fn internal(message: String) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("internal_error", &message),
        }
    }

    fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.machine = self.machine.with_detail(key, value);
        self
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self {
            exit_code: ExitCode::Validation,
            machine: MachineError::new("config_error", &err.0),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        let exit_code = match err.code {
            StoreErrorCode::NotFound | StoreErrorCode::Validation | StoreErrorCode::Parse => {
                ExitCode::Validation
            }
            StoreErrorCode::Io => ExitCode::DependencyFailure,
            _ => ExitCode::Internal,
        };
        Self {
            exit_code,
            machine: MachineError::new(err.code.as_str(), &err.message),
        }
    }
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        let exit_code = match err.code {
            ExportErrorCode::Unavailable | ExportErrorCode::Io => ExitCode::DependencyFailure,
            _ => ExitCode::Internal,
        };
        Self {
            exit_code,
            machine: MachineError::new(err.code.as_str(), &err.message),
        }
    }
}

fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
    }
}
