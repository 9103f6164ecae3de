mod ui;
mod commands;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::Layer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "vocatch",
    version,
    about = "Extract example sentences from the vocabulary corpus and write edited ones back"
)]
struct Cli {
    /// Project root; relative paths and vocatch.toml are resolved against it
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Only log warnings and errors to the console
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format: text or json
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Collect every example sentence into one numbered text file
    Extract {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Record file prefix [default: target_prefix]
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
        /// Tag every line with its file and entry index
        #[arg(long, default_value_t = false)]
        keyed: bool,
    },

    /// Write edited example sentences back into the record files
    Reinsert {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        prefix: Option<String>,
        /// Extraction artifact whose section headers describe the file layout
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Edited numbered text supplying the new examples
        #[arg(long)]
        translations: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Renumber all numbered lines with one running counter
    Renumber {
        #[arg(long)]
        input: Option<PathBuf>,
        /// Defaults to rewriting the input in place
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Strip [..] citation markers from a translated text file
    CleanCite {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Rebuild target-language record files from their source-language pair
    Swap {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        source_prefix: Option<String>,
        #[arg(long)]
        target_prefix: Option<String>,
    },

    /// Generate record files from the seed word list
    Seed {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Seed table in TOML; the built-in table is used otherwise
        #[arg(long)]
        table: Option<PathBuf>,
    },

    /// Write JSON Schemas of the report documents
    Schema {
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

struct Global {
    root: PathBuf,
    format: String,
}

trait Runnable {
    fn run(self, global: &Global) -> Result<()>;
}

impl Runnable for Commands {
    fn run(self, global: &Global) -> Result<()> {
        let cmd_name = self.name();
        info!(event = "command_start", command = cmd_name);
        let cfg = vocatch_config::load_config(&global.root)?;
        let root = global.root.clone();
        let format = global.format.as_str();

        let result = match self {
            Commands::Extract {
                data_dir,
                prefix,
                out,
                keyed,
            } => commands::extract::run_extract(&root, &cfg, data_dir, prefix, out, keyed, format),
            Commands::Reinsert {
                data_dir,
                prefix,
                manifest,
                translations,
                dry_run,
            } => commands::reinsert::run_reinsert(
                &root,
                &cfg,
                data_dir,
                prefix,
                manifest,
                translations,
                dry_run,
                format,
            ),
            Commands::Renumber { input, out } => {
                commands::text::run_renumber(&root, &cfg, input, out, format)
            }
            Commands::CleanCite { input, out } => {
                commands::text::run_clean_cite(&root, &cfg, input, out, format)
            }
            Commands::Swap {
                data_dir,
                source_prefix,
                target_prefix,
            } => commands::swap::run_swap(&root, &cfg, data_dir, source_prefix, target_prefix, format),
            Commands::Seed { data_dir, table } => {
                commands::seed::run_seed(&root, &cfg, data_dir, table, format)
            }
            Commands::Schema { out_dir } => commands::schema::run_schema(&root, &cfg, out_dir),
        };

        match &result {
            Ok(_) => info!(event = "command_finished", command = cmd_name),
            Err(e) => debug!(event = "command_failed", command = cmd_name, error = ?e),
        }
        result
    }
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Extract { .. } => "extract",
            Commands::Reinsert { .. } => "reinsert",
            Commands::Renumber { .. } => "renumber",
            Commands::CleanCite { .. } => "clean-cite",
            Commands::Swap { .. } => "swap",
            Commands::Seed { .. } => "seed",
            Commands::Schema { .. } => "schema",
        }
    }
}

fn init_tracing(quiet: bool) -> WorkerGuard {
    let log_dir = std::env::var_os("VOCATCH_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("logs"));
    let file_appender = rolling::daily(log_dir, "vocatch.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if quiet { "warn" } else { "info" };
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        );

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    guard
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _guard = init_tracing(cli.quiet);

    let use_color = !cli.no_color
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();
    ui::set_color(use_color);

    let global = Global {
        root: cli.root,
        format: cli.format,
    };
    // Reported here once; the full chain goes to the log file.
    if let Err(e) = cli.cmd.run(&global) {
        crate::ui_err!("{e:#}");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
