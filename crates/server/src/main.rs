mod api;
mod check;
mod cli;
mod router;
mod state;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use crate::cli::{CliArgs, Command};
use crate::state::AppState;

fn load_config() -> questline_core::Config {
    questline_core::config::load_dotenv();
    questline_core::Config::from_env()
}

async fn serve(mut config: questline_core::Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    cli::apply_serve_overrides(&mut config, host, port);
    config.log_summary();

    let addr = config.server.bind_addr();
    let state = Arc::new(AppState::new(config));
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let config = load_config();
    let args = CliArgs::parse();

    match args.command {
        Some(Command::Check { scenario }) => check::run(&scenario)?,
        Some(Command::Serve { host, port }) => serve(config, host, port).await?,
        None => serve(config, None, None).await?,
    }

    Ok(())
}
