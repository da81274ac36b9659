use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;
use sweeper_server::{AppState, Settings, router};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// TOML settings file
    #[arg(short, long, env = "SWEEPER_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8000
    #[arg(short, long, env = "SWEEPER_BIND")]
    bind: Option<String>,

    /// Allowed CORS origin, can be repeated
    #[arg(long = "cors-origin")]
    cors_origins: Vec<String>,

    /// JSON file to keep scores in
    #[arg(long, env = "SWEEPER_SCORES")]
    scores: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = Settings::load(args.config.as_deref())?.with_overrides(
        args.bind,
        args.cors_origins,
        args.scores,
    );
    log::debug!("settings: {:?}", settings);

    let bind = settings.bind.clone();
    let state = AppState::from_settings(settings)?;
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Could not bind {}", bind))?;
    log::info!(
        "{} {} listening on {}",
        state.settings.app_name,
        state.settings.app_version,
        bind
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Could not listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
