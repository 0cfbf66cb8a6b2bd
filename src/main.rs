mod app;
mod commands;
mod domain;
mod fade;
mod input;
mod persistence;
mod store;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{
    ensure_data_dir, init_local_dir, load_settings, save_settings, FileBackend, KeyValueBackend,
    MemoryBackend, Settings, SETTINGS_FILE,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use store::TaskStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "nextact.log";

#[derive(Parser)]
#[command(name = "nextact")]
#[command(about = "A calm, terminal-based inbox and next-actions task list", long_about = None)]
struct Cli {
    /// Use this data directory instead of the nearest .nextact
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is saved
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .nextact directory in the current directory
    Init,
    /// Capture a task without opening the TUI
    Add {
        /// Task title
        #[arg(required = true)]
        title: Vec<String>,
        /// Project label
        #[arg(short, long)]
        project: Option<String>,
        /// Context tag such as @home
        #[arg(short, long)]
        context: Option<String>,
        /// Add as a next action instead of to the inbox
        #[arg(short, long)]
        next: bool,
    },
    /// Print tasks
    List {
        /// Only tasks with this status (inbox, project, next_action)
        #[arg(short, long)]
        status: Option<String>,
        /// Only tasks labelled with this project
        #[arg(short, long)]
        project: Option<String>,
    },
}

/// Initialize tracing to a log file (TUI owns the terminal) or to stderr
fn init_tracing(log_path: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nextact=info"));

    match log_path {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let current_dir = std::env::current_dir().context("Could not determine current directory")?;
            let data_dir = init_local_dir(&current_dir)?;
            save_settings(data_dir.join(SETTINGS_FILE), &Settings::default())?;
            println!("Initialized nextact directory: {}", data_dir.display());
            println!();
            println!("nextact will now use this local directory for task storage.");
            println!("Run 'nextact' to start.");
            Ok(())
        }
        Some(Commands::Add {
            title,
            project,
            context,
            next,
        }) => {
            init_tracing(None)?;
            let data_dir = ensure_data_dir(cli.data_dir.as_deref())?;
            let mut store = TaskStore::new(Arc::new(FileBackend::new(&data_dir)));
            store.initialize();

            let title = title.join(" ");
            match commands::add_task(&mut store, &title, project.as_deref(), context.as_deref(), next) {
                Some(id) => println!("Added task {}", id),
                None => println!("Nothing added: title is empty"),
            }
            Ok(())
        }
        Some(Commands::List { status, project }) => {
            init_tracing(None)?;
            let data_dir = ensure_data_dir(cli.data_dir.as_deref())?;
            let mut store = TaskStore::new(Arc::new(FileBackend::new(&data_dir)));
            store.initialize();

            for task in commands::select_tasks(store.tasks(), status.as_deref(), project.as_deref())? {
                println!("{}", commands::format_row(task));
            }
            Ok(())
        }
        None => run_tui(cli.data_dir.as_deref(), cli.ephemeral),
    }
}

fn run_tui(data_dir: Option<&Path>, ephemeral: bool) -> Result<()> {
    let data_dir = ensure_data_dir(data_dir)?;
    init_tracing(Some(&data_dir.join(LOG_FILE)))?;

    eprintln!("Using nextact directory: {}", data_dir.display());
    tracing::info!("Starting nextact in {}", data_dir.display());

    let settings = load_settings(data_dir.join(SETTINGS_FILE));
    let backend: Arc<dyn KeyValueBackend> = if ephemeral {
        Arc::new(MemoryBackend::new())
    } else {
        Arc::new(FileBackend::new(&data_dir))
    };

    let mut store = TaskStore::new(backend);
    store.initialize();
    let mut app = AppState::new(store, settings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Finish pending fades and wait for the last writes
    app.shutdown();
    tracing::info!("Exiting with {} tasks", app.store.tasks().len());

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app, Instant::now()))?;

        let tick_rate = ticker::tick_duration(app.fades.is_active());
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}
