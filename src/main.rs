use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use ytrss::api::YouTubeApi;
use ytrss::cache::FreshnessCache;
use ytrss::config::{Config, PathOpt, StrOpt, USizeOpt};
use ytrss::env::Env;
use ytrss::log::Log;
use ytrss::net::Net;
use ytrss::server::{self, AppState};
use ytrss::{ArcPath, ArcStr};

const SCOPE: &str = "main";

#[derive(Parser)]
#[command(name = "ytrss")]
#[command(about = "Serves YouTube channel feeds as RSS 2.0 through a freshness cache")]
struct Cli {
    /// Path to the TOML configuration file
    /// [default: $HOME/.config/ytrss/config.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Port to listen on, overrides the configuration file and $PORT
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env = Env::spawn();
    let config_path = match cli.config {
        Some(path) => ArcPath::from(path),
        None => default_config_path(&env).await?,
    };

    let config = Config::spawn(env, config_path.clone());
    config
        .load()
        .await
        .with_context(|| format!("Loading configuration from {}", config_path.display()))?;
    if let Some(port) = cli.port {
        config.set_port(port).await?;
    }

    let log = Log::spawn(
        config.log_level().await?,
        config.usize(USizeOpt::MaxAge).await?,
        config.path(PathOpt::LogDir).await?,
    )
    .await?;
    log.collect_garbage().await;

    let timeout = match config.usize(USizeOpt::Timeout).await? {
        0 => None,
        secs => Some(Duration::from_secs(secs as u64)),
    };
    let net = Net::spawn(timeout, log.clone())?;
    let youtube = YouTubeApi::spawn(net, config.str(StrOpt::Upstream).await?);
    let cache_duration = config.usize(USizeOpt::CacheDuration).await?;
    let cache = FreshnessCache::spawn(Duration::from_secs(cache_duration as u64))?;

    let port = config.port().await?;
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Binding port {port}"))?;
    log.info(SCOPE, format!("Server running on port {port}"));

    let app = server::router(AppState::new(cache, youtube, log.clone()));
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Serving HTTP");

    match &served {
        Ok(()) => log.info(SCOPE, "Shutting down"),
        Err(err) => log.error(SCOPE, format!("{err:#}")),
    }
    log.flush().await?;

    served
}

/// `$HOME/.config/ytrss/config.toml`, or `ytrss.toml` in the working
/// directory when `HOME` is unset.
async fn default_config_path(env: &Env) -> anyhow::Result<ArcPath> {
    let path = match env.env(ArcStr::from("HOME")).await? {
        Some(home) => PathBuf::from(&*home)
            .join(".config")
            .join("ytrss")
            .join("config.toml"),
        None => PathBuf::from("ytrss.toml"),
    };
    Ok(ArcPath::from(path))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
