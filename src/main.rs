use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use burgerbox::config::KioskConfig;
use burgerbox::prompt::{PromptError, TerminalPrompter};
use burgerbox::session::MachineSession;
use burgerbox::ui;

#[derive(Parser)]
#[command(name = "burgerbox")]
#[command(version, about = "Interactive burger-vending kiosk simulator")]
struct Cli {
    /// Log stage transitions and selections at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Path to the kiosk config file (defaults to kiosk.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "burgerbox=debug" } else { "burgerbox=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = KioskConfig::load(cli.config.as_deref())?;
    for warning in config.validate() {
        warn!("{warning}");
    }

    ui::banner();
    let mut session = MachineSession::new(&config, TerminalPrompter::new());
    match session.run() {
        Ok(()) => {
            ui::receipt(session.counters());
            Ok(())
        }
        Err(PromptError::Aborted) => {
            // Interrupt is an unconditional exit, never a recoverable error.
            println!();
            println!("Quitting the burger machine");
            std::process::exit(130);
        }
        Err(PromptError::Io(err)) => Err(err.into()),
    }
}
