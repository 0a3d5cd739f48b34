//! EventicHub console
//!
//! Main application entry point

use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

use EventicHub::{
    config::Settings,
    handlers::{commands::start, Console, Reply, PROMPT},
    models::user::OAuthProvider,
    services::ServiceFactory,
    utils::logging,
};

/// Event management console backed by a hosted backend
#[derive(Debug, Parser)]
#[command(name = "eventichub", version, about)]
struct Cli {
    /// Configuration file; `config.toml` in the working directory is used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // .env is optional
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Settings::new().context("failed to load configuration")?,
    };
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", EventicHub::info());

    let services = ServiceFactory::new(&settings)?;

    let health = services.health_check().await;
    if health.is_healthy() {
        info!("Backend is reachable");
    } else {
        for issue in health.get_issues() {
            warn!("{}", issue);
        }
    }

    services.session.initialize().await;
    let listener = services.session.subscribe();

    let default_provider: OAuthProvider = settings
        .auth
        .default_oauth_provider
        .parse()
        .map_err(anyhow::Error::msg)?;
    let mut console = Console::new(services, default_provider);

    run_console(&mut console).await?;

    listener.abort();
    info!("EventicHub console has been shut down.");

    Ok(())
}

/// Read lines from stdin until `quit` or end of input
async fn run_console(console: &mut Console) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(format!("{}\n\n", start::render_home()).as_bytes()).await?;

    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "Failed to read console input");
                return Err(e.into());
            }
        };

        match console.handle_line(&line).await {
            Reply::Quit => break,
            Reply::Text(text) if text.is_empty() => {}
            Reply::Text(text) => stdout.write_all(format!("{}\n", text).as_bytes()).await?,
        }
    }

    Ok(())
}
