//! loanterm - Terminal Loan Application
//!
//! Presents a loan application form in the terminal and, once submitted,
//! follows the application through a simulated 15-minute review with a
//! live countdown, progress bar and status notifications.

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::{error, info};

use loanterm::application::App;
use loanterm::cli::Cli;
use loanterm::infrastructure::{RngDecision, telemetry};
use loanterm::presentation::{CrosstermEvents, run_app};

/// Entry point for the loanterm application.
///
/// Resolves configuration, sets up logging and the terminal, then runs the
/// main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, logging cannot be
/// initialised, or the terminal interface fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    telemetry::init(&config.log_level, config.log_file.as_deref())?;
    info!(page_url = %config.page_url, tick_ms = config.tick_interval_ms, "starting loanterm");

    let mut app = App::new(
        config.schedule,
        Box::new(RngDecision::from_seed_option(config.seed)),
        config.page_url.clone(),
    );

    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &mut CrosstermEvents, config.tick_interval());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(%err, "event loop failed");
        return Err(err.into());
    }

    info!("loanterm exited");
    Ok(())
}

/// Restores the terminal before the default panic report is printed.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));
}
