//! HTTP panel module
//!
//! The only inbound interface: one page, served at `/`.
//! - GET renders the current configuration and status
//! - POST runs the load -> mutate -> persist -> restart pipeline for the
//!   submitted action, then renders the same page with an outcome banner
//!
//! Requests are independent and stateless; every request re-reads the
//! record through the injected store.

pub mod render;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Form, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use tokio::net::TcpListener;

use crate::actions::Action;
use crate::constants::MSG_SAVE_FAILED;
use crate::logging::PanelLogger;
use crate::models::RestartError;
use crate::panel::render::Banner;
use crate::service::ServiceController;
use crate::store::ConfigStore;

/// Shared state handed to every request handler
pub struct AppState {
    pub store: Arc<dyn ConfigStore>,
    pub controller: Arc<dyn ServiceController>,
    pub logger: PanelLogger,
}

/// Build the panel router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(show_panel).post(handle_action))
        .with_state(state)
}

/// Bind the listener and serve the panel until ctrl-c or SIGTERM
pub async fn serve(listen_addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Failed to bind panel listener on {}", listen_addr))?;

    let logger = state.logger.clone();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Panel server terminated with an error")?;

    logger.log_shutdown("Received shutdown signal");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn show_panel(State(state): State<Arc<AppState>>) -> Html<String> {
    let config = state.store.load();
    Html(render::page(&config, &Banner::None, Utc::now().timestamp()))
}

/// Run the mutation pipeline for a submitted form.
///
/// Unrecognized actions fall through without mutation or banner. For a
/// recognized action the record is mutated and saved; on success the
/// daemon is asked to restart (outcome logged, not shown), on failure the
/// error banner is set. Either way the page re-renders the full record.
async fn handle_action(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Html<String> {
    let now = Utc::now().timestamp();
    let mut config = state.store.load();
    let mut banner = Banner::None;

    if let Some(action) = Action::from_form(&fields) {
        action.apply(&mut config, now);

        match state.store.save(&config) {
            Ok(()) => {
                state.logger.log_action_applied(action.name());
                banner = Banner::Success(action.success_message());

                let controller = state.controller.clone();
                let result = match tokio::task::spawn_blocking(move || controller.restart()).await {
                    Ok(result) => result,
                    Err(join_err) => Err(RestartError::Spawn(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        join_err,
                    ))),
                };
                state.logger.log_restart_result(&result);
            }
            Err(err) => {
                state.logger.log_save_failure(action.name(), &err);
                banner = Banner::Error(MSG_SAVE_FAILED);
            }
        }
    }

    Html(render::page(&config, &banner, now))
}
