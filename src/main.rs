use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::bail;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;

use hivestats::config::{self, Config};
use hivestats::dashboard::{DashboardApp, format_snapshot};
use hivestats::ledger::HiveClient;
use hivestats::refresh::{RefreshPeriod, RefreshScheduler};
use hivestats::stats::SnapshotFetcher;

type Dashboard = DashboardApp<SnapshotFetcher<HiveClient>>;

/// Spinner animation rate while a poll is in flight
const SPINNER_TICK: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(
    name = "hivestats",
    about = "Terminal dashboard with refreshing Hive blockchain statistics",
    version
)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ledger RPC endpoint; repeat to add fallbacks, tried in order
    #[arg(long = "endpoint", value_name = "URL")]
    endpoints: Vec<String>,

    /// Initial refresh period (1m, 5m, 15m, 30m)
    #[arg(long, value_name = "PERIOD")]
    period: Option<RefreshPeriod>,

    /// Start with auto-refresh turned off
    #[arg(long)]
    no_auto_refresh: bool,

    /// Fetch one snapshot, print it and exit
    #[arg(long)]
    once: bool,

    /// Print the snapshot as JSON (with --once)
    #[arg(long, requires = "once")]
    json: bool,
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let args = Args::parse();
    let config = resolve_config(&args)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    if args.once {
        init_once_logging();
        runtime.block_on(print_once(&config, args.json))
    } else {
        init_dashboard_logging();
        runtime.block_on(run_dashboard(config))
    }
}

/// Config file values with command-line overrides applied
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            config::load_config_from_path(path)?
        }
        None => config::load_config()?,
    };

    if !args.endpoints.is_empty() {
        config.ledger.endpoints = args.endpoints.clone();
    }
    if let Some(period) = args.period {
        config.refresh.period = period;
    }
    if args.no_auto_refresh {
        config.refresh.auto_refresh = false;
    }

    config::validate(&config)?;
    Ok(config)
}

async fn print_once(config: &Config, json: bool) -> Result<()> {
    let client = HiveClient::from_config(&config.ledger)?;
    let fetcher = SnapshotFetcher::new(client, config.sampling);

    let snapshot = fetcher.fetch_snapshot().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", format_snapshot(&snapshot));
    }

    Ok(())
}

async fn run_dashboard(config: Config) -> Result<()> {
    let client = HiveClient::from_config(&config.ledger)?;
    let fetcher = SnapshotFetcher::new(client, config.sampling);
    let mut app = DashboardApp::new(RefreshScheduler::new(fetcher, &config.refresh));

    // First snapshot is fetched as soon as the dashboard opens
    app.request_poll();

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();

    let result = run(terminal, &mut app).await;

    // Restore terminal (automatic cleanup)
    ratatui::restore();
    app.shutdown();

    result
}

async fn run(mut terminal: DefaultTerminal, app: &mut Dashboard) -> Result<()> {
    let mut events = EventStream::new();
    let mut state_rx = app.subscribe();
    let mut spinner = tokio::time::interval(SPINNER_TICK);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        let loading = state_rx.borrow().is_loading();

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    app.handle_key(key);
                }
                // Resize and other events only need a redraw
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = spinner.tick(), if loading => app.advance_frame(),
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Dashboard mode logs only in debug builds, and only to a file so the
/// terminal UI stays intact
#[cfg(debug_assertions)]
fn init_dashboard_logging() {
    let log_path = std::env::temp_dir().join("hivestats-debug.log");
    if let Ok(file) = std::fs::File::create(&log_path) {
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("hivestats=debug"),
        )
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
    }
}

#[cfg(not(debug_assertions))]
fn init_dashboard_logging() {}

fn init_once_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .try_init();
}
