use clap::Parser;
use info_api::http::auth::UserRegistry;
use info_api::utils::date::{current_tax_year, SessionClock};
use info_api::utils::{logger, validation::Validate};
use info_api::{router, AppState, ServerConfig, StubInfoStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_server_logger(config.verbose);
    }

    tracing::info!("Starting info-api");
    if config.verbose {
        tracing::debug!(
            "bind_addr: {} session_date: {:?}",
            config.bind_addr,
            config.session_date
        );
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{e}");
        std::process::exit(1);
    }

    let addr = config.socket_addr()?;

    let clock = SessionClock::new(config.session_date.clone());
    tracing::info!("Active tax year: {}", current_tax_year(&clock));

    let store = StubInfoStore::new(clock);
    let users = UserRegistry::from_config(&config);
    let state = AppState::new(Arc::new(store), users);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
