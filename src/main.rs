use std::path::PathBuf;
use std::process::ExitCode;

use checkers::config::Config;
use checkers::{gui, tui};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "checkers", about = "Two-player checkers in the terminal or a window")]
struct Args {
    /// Open the windowed board instead of the text interface
    #[arg(long)]
    gui: bool,

    /// Rule configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Forward-only captures and a single capture per turn
    #[arg(long)]
    classic: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // The text interface shares stdout with the log, so keep it quiet by default.
    let default_level = if args.gui { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Could not load {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    if args.classic {
        config = Config::classic();
    }
    tracing::debug!(?config, "starting");

    let result = if args.gui {
        gui::run(config).map_err(|e| e.to_string())
    } else {
        tui::run(config).map_err(|e| e.to_string())
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
