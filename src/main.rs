#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use wifid_panel::cli;
use wifid_panel::logging::PanelLogger;
use wifid_panel::panel::{self, AppState};
use wifid_panel::service::SystemdController;
use wifid_panel::store::FileStore;

#[tokio::main]
async fn main() -> Result<()> {
    let options = cli::parse_args()?;

    let default_filter = if options.quiet { "error" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let logger = PanelLogger::new(options.service_unit.clone());
    logger.log_startup(options.listen_addr, &options.config_path);

    let state = Arc::new(AppState {
        store: Arc::new(FileStore::new(options.config_path)),
        controller: Arc::new(SystemdController::new(options.service_unit)),
        logger,
    });

    panel::serve(options.listen_addr, state).await
}
