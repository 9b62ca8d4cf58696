// Start of file: src/main.rs

use axum::{Router, serve};
use tokio::net::TcpListener;

use refunds_api::config::{environment::EnvironmentVariables, state::AppState};
use refunds_api::core::{
    logging::init_tracing,
    server::{build_aggregator, create_app, setup_listener, shutdown_signal},
};
use refunds_api::routing::RouteAggregator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Configuration and state are built explicitly and handed down
    let environment: EnvironmentVariables = EnvironmentVariables::load()?;
    let state: AppState = AppState::new(environment);

    let aggregator: RouteAggregator = build_aggregator(&state)?;

    let app: Router = create_app(&state.environment, aggregator);
    let listener: TcpListener = setup_listener(&state.environment).await?;

    tracing::info!(
        "Server listening on: {}://{}",
        state.environment.protocol,
        listener.local_addr()?
    );

    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

// End of file: src/main.rs
