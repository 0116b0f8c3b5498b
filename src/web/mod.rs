use std::sync::Arc;
use axum::routing::{get, post};
use axum::Router;
use log::info;
use tokio::net::TcpListener;
use tokio::signal;
use crate::api::distribution::Distribution;
use crate::config::{Config, Theme};
use crate::error::Error;

mod render;
mod routes;
mod session;

/// Everything a request handler needs. The client is shared, all registry data is fetched
/// per request
#[derive(Debug)]
pub struct AppState {
    pub distribution: Distribution,
    /// Registry url without scheme shown in the page header
    pub site: String,
    pub theme: Theme,
    pub enable_login: bool,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: &Config, distribution: Distribution) -> Self {
        Self { distribution, site: config.site(), theme: config.theme, enable_login: config.enable_login }
    }
}

pub fn router(state: SharedState) -> Router {
    let mut router = Router::new()
        .route("/", get(routes::list_repositories))
        .route("/repo", get(routes::list_tags))
        .route("/image", get(routes::image_history));
    if state.enable_login {
        router = router
            .route("/login", get(routes::login))
            .route("/submit_login", post(routes::submit_login));
    }
    router.with_state(state)
}

/// Serve the web interface until a shutdown signal is received
pub async fn serve(config: &Config, state: SharedState) -> Result<(), Error> {
    let address = config.address();
    let listener = TcpListener::bind(&address).await.map_err(|err| Error::Bind(address.clone(), err))?;
    info!("Listening on http://{address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::Serve)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            log::error!("Unable to listen for Ctrl+C. Reason: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => { signal.recv().await; },
            Err(err) => {
                log::error!("Unable to listen for SIGTERM. Reason: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server");
}
