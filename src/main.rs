mod assets;
mod bridge;
mod cli;
mod config;
mod error;
mod session;
mod surface;
mod timing;
mod transport;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use crate::assets::ImageFileLoader;
use crate::cli::Cli;
use crate::error::BridgeError;
use crate::session::spawn_session;
use crate::surface::HeadlessSurfaces;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the event stream, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match serve(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "cellview: terminated");
            ExitCode::FAILURE
        }
    }
}

async fn serve(cli: &Cli) -> Result<(), BridgeError> {
    let config = cli.config();
    let session = spawn_session(config, Arc::new(HeadlessSurfaces::new()), Arc::new(ImageFileLoader))?;
    tracing::info!(session_id = %session.session_id(), "cellview: session started");
    transport::run(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), session).await
}
