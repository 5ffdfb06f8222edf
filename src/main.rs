use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use nntpub::{NntpServer, ServerConfig, source};

#[derive(Debug, Parser)]
#[command(name = "nntpub", version, about = "Minimal NNTP reader server")]
struct Cli {
    #[arg(short, long, value_name = "FILE", default_value = "nntpub.ini")]
    config: PathBuf,

    #[arg(short, long, help = "Log at debug level")]
    verbose: bool,

    #[arg(long, value_name = "ADDR", help = "Override the listen address")]
    listen: Option<IpAddr>,

    #[arg(long, value_name = "PORT", help = "Override the listen port")]
    port: Option<u16>,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(cli: &Cli) -> Result<ServerConfig> {
    let mut config = ServerConfig::load(&cli.config)
        .with_context(|| format!("loading config: {}", cli.config.display()))?;
    if let Some(listen) = cli.listen {
        config.listen = listen;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let source = source::from_config(&config).context("building news source")?;
    let server = NntpServer::bind(&config, source)
        .await
        .with_context(|| format!("binding {}:{}", config.listen, config.port))?;

    let shutdown = CancellationToken::new();
    let server_task = tokio::spawn(server.serve(shutdown.clone()));

    tokio::signal::ctrl_c().await.context("awaiting ctrl-c")?;
    tracing::info!("shutdown signal received");
    shutdown.cancel();

    server_task.await.context("joining listener")??;
    tracing::info!("shutdown complete");
    Ok(())
}
