use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

use smartplug_monitor::app::export_once;
use smartplug_monitor::config::{Overrides, Settings};
use smartplug_monitor::{events, ui, App, Theme};

/// Upper bound on how long to wait for a key before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "smartplug")]
#[command(about = "Live chart of current and power readings from an ESP8266 smart plug")]
struct Args {
    /// Config file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// URL of the plug's current.log
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Replay a captured current.log instead of polling the plug
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Pause between fetches (e.g., "100s", "500ms", "2m")
    #[arg(short, long)]
    refresh: Option<String>,

    /// HTTP request timeout (e.g., "10s")
    #[arg(long)]
    timeout: Option<String>,

    /// Mains voltage used to derive power from current
    #[arg(long)]
    voltage: Option<f64>,

    /// Title shown in the header bar
    #[arg(long)]
    title: Option<String>,

    /// Directory for the log file
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Fetch once, export the samples to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            file: self.file.clone(),
            refresh: self.refresh.clone(),
            timeout: self.timeout.clone(),
            voltage: self.voltage,
            title: self.title.clone(),
            log_dir: self.log_dir.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref(), &args.overrides())?;
    let _guard = setup_logging(&settings.log_dir)?;
    info!(?settings, "starting");

    let mut source = settings.build_source()?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        let count = export_once(source.as_mut(), settings.voltage, export_path)?;
        println!("Exported {} samples to: {}", count, export_path.display());
        return Ok(());
    }

    // Detect the theme before the terminal switches to raw mode
    let app = App::new(source, settings.voltage, settings.refresh_interval()?)
        .with_title(settings.title.clone())
        .with_theme(Theme::auto_detect());

    // Any error inside the loop ends monitoring; report it and finish normally
    if let Err(e) = run_tui(app) {
        error!("monitoring stopped: {:#}", e);
        println!("{:#}", e);
        println!("\ndone!");
    }

    info!("shutting down");
    Ok(())
}

/// Log to a daily rolling file; the TUI owns stdout.
fn setup_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "smartplug.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false) // Disable ANSI colors in log files
        .with_level(true)
        .init();

    Ok(guard)
}

/// Run the TUI until the user quits or an error ends the loop.
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    info!(source = app.source_description(), "monitoring");

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    let restored = restore_terminal(&mut terminal);
    finish(result, restored)
}

/// Undo raw mode and the alternate screen, attempting every step.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();

    raw?;
    screen?;
    cursor?;
    Ok(())
}

/// Combine the loop result with the terminal restore result.
///
/// The loop's error is what the user needs to see; a restore failure only
/// surfaces when the loop itself ended cleanly.
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    match (result, restored) {
        (Err(e), Err(restore_err)) => {
            warn!("failed to restore terminal: {:#}", restore_err);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), Err(restore_err)) => Err(restore_err.context("Failed to restore terminal")),
        (Ok(()), Ok(())) => Ok(()),
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Don't wait at all when a fetch is due (an empty response retries at once)
        let timeout = if app.fetch_due(Instant::now()) {
            Duration::ZERO
        } else {
            app.time_until_fetch().min(POLL_INTERVAL)
        };

        // Resize events need no handling; the next iteration redraws
        if let Some(Event::Key(key)) = events::poll_event(timeout)? {
            events::handle_key_event(app, key);
        }

        if app.running && app.fetch_due(Instant::now()) {
            app.reload_data()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_finish_keeps_loop_error_when_restore_fails() {
        let result = finish(Err(anyhow!("Connection refused")), Err(anyhow!("not a tty")));
        assert_eq!(result.unwrap_err().to_string(), "Connection refused");
    }

    #[test]
    fn test_finish_keeps_loop_error_when_restore_succeeds() {
        let result = finish(Err(anyhow!("Request timed out")), Ok(()));
        assert_eq!(result.unwrap_err().to_string(), "Request timed out");
    }

    #[test]
    fn test_finish_reports_restore_failure_after_clean_exit() {
        let err = finish(Ok(()), Err(anyhow!("not a tty"))).unwrap_err();
        assert_eq!(format!("{:#}", err), "Failed to restore terminal: not a tty");
    }

    #[test]
    fn test_finish_clean() {
        assert!(finish(Ok(()), Ok(())).is_ok());
    }
}
