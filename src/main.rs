use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use task_duration::app::{write_chart_option, App, View};
use task_duration::settings::{Overrides, Settings};
use task_duration::{events, ui, AutoRefresh, DurationChart, FileSource, TaskDurationData};

#[derive(Parser, Debug)]
#[command(name = "task-duration")]
#[command(about = "Terminal task-duration chart for workflow orchestrator runs")]
struct Args {
    /// Path to the task-duration JSON payload
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Auto-refresh interval (e.g., "5s", "500ms", "1m")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Display unit: auto, seconds, minutes, hours or days
    #[arg(short, long)]
    unit: Option<String>,

    /// Start with auto-refresh switched off
    #[arg(long)]
    no_auto_refresh: bool,

    /// Settings file (TOML, YAML, JSON...) layered under env and flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write diagnostics to this file (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Export the chart option JSON to this file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let overrides = Overrides {
        file: args.file.clone(),
        refresh: args.refresh.clone(),
        unit: args.unit.clone(),
        auto_refresh: args.no_auto_refresh.then_some(false),
    };
    let settings = Settings::load(args.config.as_deref(), &overrides)?;
    info!(?settings, "settings loaded");

    if let Some(ref export_path) = args.export {
        return export_to_file(&settings, export_path);
    }

    let refresh = AutoRefresh::new(settings.auto_refresh, settings.refresh_interval()?);
    let source = Box::new(FileSource::new(&settings.file));
    let app = App::new(source, refresh, settings.unit_choice()?);

    run_tui(app)
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal if we panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        app.tick();

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered =
                    ratatui::layout::Rect::new(0, area.height.saturating_sub(5) / 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Chart => ui::chart::render(frame, app, chunks[2]),
                View::Table => ui::table::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Load the payload once, build the chart and write its option document
fn export_to_file(settings: &Settings, export_path: &Path) -> Result<()> {
    let data = TaskDurationData::load(&settings.file)?;
    let chart = DurationChart::from_data(&data, settings.unit_choice()?);
    write_chart_option(&chart, export_path)?;

    println!(
        "Exported {} tasks over {} runs ({}) to: {}",
        chart.task_ids.len(),
        chart.run_count(),
        chart.unit,
        export_path.display()
    );
    Ok(())
}
