use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use deck_wizard::console::{ConsoleAction, ConsoleApp};
use deck_wizard::error::{Result, WizardError};
use deck_wizard::event::{Event, EventHandler};
use deck_wizard::script;
use deck_wizard::{TrackerSummary, WizardConfig};
use ratatui::prelude::*;
use std::io::stdout;
use std::panic;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "deck-wizard")]
#[command(author, version, about = "Walk through a multi-page wizard and track its completion")]
struct Args {
    /// Path to wizard config file (default: ~/.config/deck-wizard/wizard.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay a command script headlessly instead of opening the console
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log file path (logging disabled if not specified)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // The console owns the terminal, so logs only ever go to a file
    if let Some(ref log_path) = args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .ok();

        if let Some(file) = file {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"));

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();

            info!("Starting deck-wizard");
        }
    }

    let config = match args.config {
        Some(ref path) => WizardConfig::load_from(path)?,
        None => WizardConfig::load()?,
    };

    let result = match args.script {
        Some(ref path) => run_script(config, path),
        None => run_interactive(config).await,
    };

    if let Err(ref e) = result {
        error!("deck-wizard error: {}", e);
    }

    result
}

fn run_script(config: WizardConfig, path: &Path) -> Result<()> {
    let source = std::fs::read_to_string(path)?;
    let mut tracker = config.build_tracker();

    let report = script::replay(&mut tracker, &source, &mut stdout().lock())?;
    info!("Replayed {} commands from {:?}", report.commands, path);

    print_summary(&tracker.summary());
    Ok(())
}

async fn run_interactive(config: WizardConfig) -> Result<()> {
    // Restore the terminal before the default hook prints the panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let result = run_console(&mut terminal, config).await;
    restore_terminal()?;

    match result? {
        Some(summary) => print_summary(&summary),
        None => println!("Wizard closed without submitting"),
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().map_err(|e| WizardError::Terminal(e.to_string()))?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| WizardError::Terminal(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| WizardError::Terminal(e.to_string()))
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().map_err(|e| WizardError::Terminal(e.to_string()))?;
    execute!(stdout(), LeaveAlternateScreen).map_err(|e| WizardError::Terminal(e.to_string()))?;
    Ok(())
}

/// Returns the submitted summary, or `None` if the user quit
async fn run_console(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    config: WizardConfig,
) -> Result<Option<TrackerSummary>> {
    let tick_rate = Duration::from_millis(250);
    let mut events = EventHandler::new(tick_rate);
    let mut app = ConsoleApp::new(config);

    loop {
        terminal
            .draw(|frame| deck_wizard::ui::draw(frame, &app))
            .map_err(|e| WizardError::Terminal(e.to_string()))?;

        let Some(event) = events.next().await else {
            return Ok(None);
        };

        match event {
            Event::Key(key) => match app.handle_key(key) {
                Some(ConsoleAction::Submit(summary)) => return Ok(Some(summary)),
                Some(ConsoleAction::Quit) => {
                    info!("Wizard closed: {}", app.tracker.summary());
                    return Ok(None);
                }
                None => {}
            },
            Event::Resize => {}
            Event::Tick => app.tick(),
        }
    }
}

fn print_summary(summary: &TrackerSummary) {
    println!("{summary}");
    if !summary.all_visited {
        println!("Some pages were never visited");
    }
}
