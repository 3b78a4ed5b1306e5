//! Lookout - live terminal dashboard for automated-agent activity feeds.
//!
//! ## Usage
//!
//! ```bash
//! # Start the TUI dashboard
//! lookout
//!
//! # With verbose logging
//! lookout -v
//!
//! # Against a different feed API
//! lookout --base-url https://feed.example.com
//!
//! # One-shot text snapshot (no TUI)
//! lookout snapshot
//! ```

use std::io::Write;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use lookout_core::{init_logging, Config, LogGuard};
use lookout_tui::App;
use tracing::{error, info};

/// Lookout agent activity dashboard
///
/// A terminal dashboard that polls a feed API for agent status, threaded
/// activity, board health, and blog posts.
#[derive(Parser, Debug)]
#[command(name = "lookout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging (increases log level)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory for log files (defaults to ~/.lookout/logs/)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Configuration file (defaults to ~/.lookout/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Feed API base URL (overrides the configured value)
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch everything once and print a text snapshot to stdout
    Snapshot,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::from(1);
        }
    };

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {}", e);
            eprintln!("Error: {}", e);
            if let Some(guidance) = e.guidance() {
                eprintln!("{}", guidance);
            }
            return ExitCode::from(1);
        }
    };

    // The TUI loop is synchronous; the runtime backs the polling tasks.
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            return ExitCode::from(1);
        }
    };

    match cli.command {
        Some(Command::Snapshot) => match runtime.block_on(print_snapshot(&config)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("snapshot failed: {}", e);
                eprintln!("Error: {}", e);
                ExitCode::from(1)
            }
        },
        None => {
            install_panic_hook();
            info!("Starting Lookout dashboard");

            let _enter = runtime.enter();
            match run_app(&config) {
                Ok(()) => {
                    info!("Lookout exited normally");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("Lookout error: {}", e);
                    eprintln!("Error: {}", e);
                    ExitCode::from(1)
                }
            }
        }
    }
}

/// Install a panic hook that restores the terminal before printing the panic
/// message.
///
/// Without this a panic in raw mode with the alternate screen enabled leaves
/// the terminal unusable and the message invisible.
fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

/// Restore terminal to its normal state.
fn restore_terminal() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();

    let _ = crossterm::terminal::disable_raw_mode();
    crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen)?;
    crossterm::execute!(stdout, crossterm::cursor::Show)?;
    stdout.flush()?;

    Ok(())
}

/// Set up logging based on CLI arguments.
fn setup_logging(cli: &Cli) -> lookout_core::Result<LogGuard> {
    init_logging(cli.log_dir.clone(), cli.verbose > 0)
}

/// Load configuration and apply CLI overrides.
fn load_config(cli: &Cli) -> lookout_core::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Run the TUI application.
fn run_app(config: &Config) -> lookout_tui::AppResult<()> {
    let mut app = App::new(config)?;
    app.run()
}

/// One-shot fetch of every endpoint, printed as plain text.
///
/// Useful for scripts and for checking connectivity without entering the
/// alternate screen.
async fn print_snapshot(config: &Config) -> anyhow::Result<()> {
    use lookout_api::ApiClient;
    use lookout_core::aggregate;
    use lookout_core::format::{compact_count, relative_time};

    let client = ApiClient::from_config(&config.api)?;
    let now = chrono::Utc::now();

    let (status, activity, board) = tokio::try_join!(
        client.fetch_agent_status(),
        client.fetch_activity(),
        client.fetch_board_health(),
    )?;

    let view = aggregate(&status.agents, &[activity.items]);

    println!("Agents ({}):", status.agents.len());
    for agent in &status.agents {
        println!(
            "  {} {}  ({})",
            agent.state.indicator(),
            agent.label(),
            relative_time(agent.last_seen_at, now)
        );
    }

    println!(
        "\nActivity: {} items, {} working, {} open",
        compact_count(view.items.len() as u64),
        view.summary.working_agents,
        compact_count(view.summary.open_items as u64),
    );
    for item in &view.items {
        let indent = if item.parent_id.is_some() { "    " } else { "  " };
        println!(
            "{}{} {}  ({})",
            indent,
            item.agent_key.as_deref().unwrap_or("—"),
            item.title(),
            relative_time(item.timestamp, now)
        );
    }

    println!("\nBoard: {} items", compact_count(board.total_items));
    for segment in board.segments() {
        println!("  {:<12} {:>5}  {:>3.0}%", segment.status, segment.count, segment.percent);
    }

    Ok(())
}
