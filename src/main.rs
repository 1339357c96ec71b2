use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use crossterm::event::KeyEventKind;
use tracing::info;

use hostpulse::app::{App, ResolvedKeybinds, View};
use hostpulse::config::{Config, load_config, load_config_from_path};
use hostpulse::event::{Event, EventHandler};
use hostpulse::logging;
use hostpulse::record::JsonLinesRenderer;
use hostpulse::scheduler::Scheduler;
use hostpulse::system::collector::Collector;
use hostpulse::system::engine::SamplingEngine;
use hostpulse::ui::{Renderer, TerminalRenderer};

#[derive(Parser)]
#[command(
    name = "hostpulse",
    version,
    about = "Live terminal dashboard of host CPU, memory, disk, network and top processes"
)]
struct Cli {
    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long, global = true)]
    refresh_rate: Option<u64>,

    /// Number of processes to show
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Hide processes at or below this CPU percentage
    #[arg(long, global = true)]
    threshold: Option<f32>,

    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log as JSON lines instead of plain text
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Summary line and ranked process table
    Profile,
    /// CPU and memory gauges, disks, networks and processes
    Scan,
    /// Print snapshots as JSON lines without a terminal UI
    Record {
        /// Number of ticks to record
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    if let Some(path) = config.log_file() {
        logging::init_file(&path, cli.log_json)?;
    }
    info!(
        refresh_rate_ms = config.refresh_rate_ms(),
        limit = config.processes.limit,
        "starting"
    );

    let view = match cli.command {
        Some(Command::Record { count }) => return run_record(&config, count).await,
        Some(Command::Profile) => View::Table,
        Some(Command::Scan) => View::Panels,
        None => View::from_str_config(&config.general.default_view),
    };

    let terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(terminal, &config, view).await;

    ratatui::restore();

    result
}

fn spawn_scheduler(config: &Config) -> Scheduler {
    let engine = SamplingEngine::new(config.engine_config());
    let period = Duration::from_millis(config.refresh_rate_ms());
    Scheduler::spawn(engine, Collector::new(), period)
}

async fn run(terminal: ratatui::DefaultTerminal, config: &Config, view: View) -> Result<()> {
    let keybinds = ResolvedKeybinds::from_config(&config.keybinds);
    let app = App::new(view, config.refresh_rate_ms(), keybinds);
    let mut renderer = TerminalRenderer::new(terminal, app);
    let mut events = EventHandler::new();
    let mut scheduler = spawn_scheduler(config);

    renderer.redraw()?;

    while renderer.app.running {
        tokio::select! {
            event = events.next() => match event {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    let action = renderer.app.map_key(key);
                    renderer.app.dispatch(action);
                    renderer.redraw()?;
                }
                Some(Event::Resize) => renderer.redraw()?,
                Some(_) => {}
                None => break,
            },
            snapshot = scheduler.next() => match snapshot {
                Some(snapshot) => renderer.render(snapshot)?,
                None => break,
            },
        }
    }

    scheduler.shutdown().await
}

async fn run_record(config: &Config, count: usize) -> Result<()> {
    let mut renderer = JsonLinesRenderer::new(std::io::stdout().lock());
    let mut scheduler = spawn_scheduler(config);

    while renderer.written() < count {
        let Some(snapshot) = scheduler.next().await else {
            break;
        };
        renderer.render(snapshot)?;
    }

    scheduler.shutdown().await
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(limit) = cli.limit {
        config.processes.limit = limit;
    }
    if let Some(threshold) = cli.threshold {
        config.processes.cpu_threshold = threshold;
    }
    if let Some(ref path) = cli.log_file {
        config.general.log_file = path.display().to_string();
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_config() {
        let cli = Cli::parse_from([
            "hostpulse",
            "--config",
            "/nonexistent/hostpulse.toml",
            "--refresh-rate",
            "500",
            "--limit",
            "5",
            "--threshold",
            "1.5",
            "scan",
        ]);
        let config = load_config_for_cli(&cli);
        assert_eq!(config.general.refresh_rate_ms, 500);
        assert_eq!(config.processes.limit, 5);
        assert_eq!(config.processes.cpu_threshold, 1.5);
        assert!(matches!(cli.command, Some(Command::Scan)));
    }

    #[test]
    fn record_takes_a_count() {
        let cli = Cli::parse_from(["hostpulse", "record", "--count", "3"]);
        assert!(matches!(cli.command, Some(Command::Record { count: 3 })));
    }

    #[test]
    fn no_command_uses_default_view() {
        let cli = Cli::parse_from(["hostpulse", "--config", "/nonexistent/hostpulse.toml"]);
        assert!(cli.command.is_none());
        let config = load_config_for_cli(&cli);
        assert_eq!(View::from_str_config(&config.general.default_view), View::Panels);
    }
}
