use std::process::exit;
use std::sync::Arc;
use log::{error, info};
use regview::api::distribution::Distribution;
use regview::api::DistributionConfig;
use regview::config::Config;
use regview::error::Error;
use regview::web::{self, AppState};

#[tokio::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Err(err) = run().await {
        error!("{err}");
        exit(1)
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::load()?;

    info!("Registry URL is {}", config.registry);
    info!("UI theme is '{}'", config.theme.name());
    if config.enable_login {
        info!("Login page is enabled")
    }
    if config.credentials.is_some() {
        info!("Using static credentials for requests without a login")
    }

    let distribution = Distribution::new(DistributionConfig::new(config.registry.clone(), config.credentials.clone()))?;
    let state = Arc::new(AppState::new(&config, distribution));
    web::serve(&config, state).await
}
