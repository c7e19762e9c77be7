use anyhow::Context;
use clap::Parser;
use config::Config;
use gamelog::{
    autostart,
    cli::{Cli, Command},
    roots::GlobRoots,
    signals::{dispatch, wait_for_signal},
};
use orchestrator::{GameCatalog, GameLogEngine, Services, SysinfoScanner, SystemClock, sink};
use std::{fs::OpenOptions, sync::Mutex};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    debug!(config = ?cli);

    let config = match &cli.conffile {
        Some(path) => Config::load(path)?,
        _ => Config::new()?,
    };
    debug!(?config, "configuration loaded");

    match cli.command.unwrap_or_default() {
        Command::Run => run(config).await,
        Command::Install => install(&cli),
        Command::Uninstall => uninstall(),
        Command::Catalog => print_catalog(config),
    }
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .with_level(true)
        .with_file(true)
        .with_line_number(true);

    match &cli.logfile {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.init(),
    }
    Ok(())
}

async fn run(config: Config) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;

    let services = Services {
        scanner: Box::new(SysinfoScanner::new()),
        catalog: GameCatalog::new(Box::new(GlobRoots::new(config.catalog.roots.clone()))),
        sink: sink::from_config(&config.sink)
            .await
            .context("cannot open session sink")?,
        clock: Box::new(SystemClock),
    };
    let mut engine = GameLogEngine::new(&config, services)?;

    let cancel = CancellationToken::new();
    let (control_tx, control_rx) = mpsc::unbounded_channel();
    let (events_tx, events_rx) = flume::bounded(8);

    let listener_cancel = cancel.clone();
    tokio::spawn(async move {
        if let Err(err) = wait_for_signal(&events_tx).await {
            error!(error = ?err, "Error while waiting for signal");
            listener_cancel.cancel();
        }
    });
    tokio::spawn(dispatch(events_rx, control_tx, cancel.clone()));

    engine.run_until(cancel, control_rx).await?;
    Ok(())
}

#[allow(clippy::print_stdout)]
fn install(cli: &Cli) -> anyhow::Result<()> {
    let exe = std::env::current_exe().context("cannot locate the gamelog executable")?;
    let conffile = cli
        .conffile
        .as_deref()
        .map(std::path::absolute)
        .transpose()?;
    let path = autostart::install(&autostart::autostart_dir()?, &exe, conffile.as_deref())?;
    println!("Autostart entry installed at {}", path.display());
    println!("Gamelog will start automatically when you log in.");
    Ok(())
}

#[allow(clippy::print_stdout)]
fn uninstall() -> anyhow::Result<()> {
    match autostart::uninstall(&autostart::autostart_dir()?)? {
        Some(path) => println!("Autostart entry removed: {}", path.display()),
        None => println!("No autostart entry installed."),
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_catalog(config: Config) -> anyhow::Result<()> {
    let mut catalog = GameCatalog::new(Box::new(GlobRoots::new(config.catalog.roots)));
    let games = catalog.refresh()?.clone();

    if catalog.is_empty() {
        println!("No readable library roots configured.");
        return Ok(());
    }
    for root in catalog.roots() {
        println!("{}", root.display());
        for game in games.iter().filter(|game| game.root == root) {
            println!("  {}", game.name);
        }
    }
    Ok(())
}
