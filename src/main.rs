use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use scrape_console::client::{Command, ExportKind, HttpSupervisorClient, SupervisorApi};
use scrape_console::config::{Config, ConfigOverrides};
use scrape_console::dispatch::CommandDispatcher;
use scrape_console::logging::{default_log_path, init_tracing, LogTarget};
use scrape_console::machine::ProcessStateMachine;
use scrape_console::supervisor::SupervisorServer;

#[derive(Parser)]
#[command(
    name = "scrape-console",
    version,
    about = "Operator console for a supervised scraper process"
)]
struct Cli {
    #[arg(long, help = "Path to config file (default: ~/.config/scrape-console/config.toml)")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Supervisor base URL")]
    base_url: Option<String>,

    #[arg(long, global = true, help = "Status poll interval in milliseconds")]
    poll_interval_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum CliCommand {
    /// Interactive console (default)
    Console,
    /// Run the supervisor facade
    Serve {
        #[arg(long, help = "Listen address, e.g. 127.0.0.1:5000")]
        bind: Option<std::net::SocketAddr>,
    },
    /// Print one status snapshot
    Status,
    /// Launch the scraper
    Start,
    /// Launch the spreadsheet export
    Export,
    /// Stop the running process
    Stop,
    /// Send Enter to the running process
    Enter,
    /// Toggle auto-scroll in the running process
    ToggleScroll,
    /// Open the external browser
    OpenBrowser,
}

impl CliCommand {
    fn as_command(self) -> Option<Command> {
        match self {
            CliCommand::Start => Some(Command::Start),
            CliCommand::Export => Some(Command::Export(ExportKind::Spreadsheet)),
            CliCommand::Stop => Some(Command::Stop),
            CliCommand::Enter => Some(Command::SendEnter),
            CliCommand::ToggleScroll => Some(Command::ToggleScroll),
            CliCommand::OpenBrowser => Some(Command::OpenBrowser),
            CliCommand::Console | CliCommand::Serve { .. } | CliCommand::Status => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(CliCommand::Console);

    let target = match command {
        CliCommand::Console => LogTarget::File(default_log_path()),
        _ => LogTarget::Stderr,
    };
    init_tracing(target).context("failed to initialise logging")?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }?;
    let overrides = ConfigOverrides {
        base_url: cli.base_url.clone(),
        poll_interval_ms: cli.poll_interval_ms,
        bind_addr: match command {
            CliCommand::Serve { bind } => bind.map(|addr| addr.to_string()),
            _ => None,
        },
    };
    let config = overrides.apply(config)?;

    match command {
        CliCommand::Console => scrape_console::ui::run(&config).await?,
        CliCommand::Serve { .. } => serve(&config).await?,
        CliCommand::Status => print_status(&config).await?,
        other => {
            if let Some(command) = other.as_command() {
                run_once(&config, command).await?;
            }
        }
    }
    Ok(())
}

async fn serve(config: &Config) -> Result<()> {
    let mut server = SupervisorServer::new(config);
    server.try_bind(&config.supervisor.bind_addr).await?;
    server.run().await?;
    Ok(())
}

fn client(config: &Config) -> Result<Arc<dyn SupervisorApi>> {
    let client = HttpSupervisorClient::new(&config.console, &config.endpoints)?;
    Ok(Arc::new(client))
}

async fn print_status(config: &Config) -> Result<()> {
    let snapshot = client(config)?
        .status()
        .await
        .context("supervisor did not return a status")?;

    let mut machine = ProcessStateMachine::new();
    machine.apply_snapshot(snapshot);
    let view = machine.view();

    println!("{}: {}", view.status_label, view.task_label);
    if view.scroll_status_visible {
        println!("auto-scroll: on");
    }
    for line in view.log {
        println!("  {}", line);
    }
    Ok(())
}

async fn run_once(config: &Config, command: Command) -> Result<()> {
    let dispatcher = CommandDispatcher::new(client(config)?);
    let notification = dispatcher.dispatch(command).await;
    println!("{}", notification);
    if notification.is_error() {
        std::process::exit(1);
    }
    Ok(())
}
