use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{poll as event_poll, read as event_read, Event as CrosstermEvent, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use site_console::app::App;
use site_console::config::Config;
use site_console::services::terminal_modes::{self, TerminalModes};
use site_console::services::time_source::RealTimeSource;
use site_console::services::{app_dirs, tracing_setup};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// A text rendition of a personal site with a small shell-like console
#[derive(Parser, Debug)]
#[command(name = "site-console")]
#[command(about = "Browse the site as files from a mock terminal", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (default: XDG state dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Print the directories used by site-console and exit
    #[arg(long)]
    show_paths: bool,

    /// Keep the console closed until Enter is pressed
    #[arg(long)]
    no_auto_open: bool,
}

fn load_config(args: &Args) -> AnyhowResult<Config> {
    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => match app_dirs::config_path() {
            Some(path) => Config::load_or_default(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::default(),
        },
    };
    Ok(config)
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    if args.show_paths {
        app_dirs::print_all_paths();
        return Ok(());
    }

    if args.dump_config {
        let config = load_config(&args)?;
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(app_dirs::main_log_path);
    if !tracing_setup::init_global(&log_file) {
        eprintln!("Warning: logging disabled, could not open {}", log_file.display());
    }
    app_dirs::cleanup_stale_logs();
    tracing::info!("site-console starting");

    let config = load_config(&args)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        terminal_modes::emergency_cleanup();
        original_hook(panic);
    }));

    let mut modes = TerminalModes::enable()?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout())).context("Failed to create terminal")?;
    terminal.clear()?;

    let mut app = App::new(&config, RealTimeSource::shared());
    if args.no_auto_open {
        app.disable_auto_open();
    }

    let result = run_event_loop(&mut app, &mut terminal);

    modes.undo();
    tracing::info!("site-console exiting");
    result
}

fn run_event_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> AnyhowResult<()> {
    const FRAME_DURATION: Duration = Duration::from_millis(16); // 60fps
    let mut last_render = Instant::now();
    let mut needs_render = true;

    loop {
        if app.tick() {
            needs_render = true;
        }

        if app.should_quit() {
            break;
        }

        if needs_render && last_render.elapsed() >= FRAME_DURATION {
            terminal.draw(|frame| app.render(frame))?;
            last_render = Instant::now();
            needs_render = false;
        }

        let timeout = if needs_render {
            FRAME_DURATION.saturating_sub(last_render.elapsed())
        } else {
            Duration::from_millis(50)
        };
        if !event_poll(timeout)? {
            continue;
        }

        match event_read()? {
            CrosstermEvent::Key(key_event) => {
                if key_event.kind == KeyEventKind::Press && app.handle_key(key_event) {
                    needs_render = true;
                }
            }
            CrosstermEvent::Paste(text) => {
                if app.paste(&text) {
                    needs_render = true;
                }
            }
            CrosstermEvent::Resize(_, _) => needs_render = true,
            _ => {}
        }
    }

    Ok(())
}
