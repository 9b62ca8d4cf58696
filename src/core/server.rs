// Application server configuration and setup

use std::time::Duration;
use axum::{
    Router,
    middleware::from_fn_with_state,
    extract::DefaultBodyLimit,
    error_handling::HandleErrorLayer,
};
use tower::{ServiceBuilder, timeout::TimeoutLayer};
use tokio::{signal, net::TcpListener};
use listenfd::ListenFd;
use anyhow::{Context, Result};
use tracing::info;

use crate::api;
use crate::config::{environment::EnvironmentVariables, state::AppState};
use crate::routing::{AggregatorBuilder, HandlerGroup, MatchMode, RouteAggregator};
use crate::utils::{
    error_handler::handle_global_error,
    response_handler::response_wrapper,
};

/// Builds the binding table from the configured mount entries.
/// Unknown group names and duplicate prefixes abort startup.
pub fn build_aggregator(state: &AppState) -> Result<RouteAggregator> {
    let env: &EnvironmentVariables = &state.environment;
    let mode: MatchMode = if env.route_case_sensitive {
        MatchMode::CaseSensitive
    } else {
        MatchMode::CaseInsensitive
    };

    let mut builder: AggregatorBuilder<AppState> = AggregatorBuilder::new(state.clone(), mode);

    for mount in &env.route_mounts {
        let group: Box<dyn HandlerGroup<AppState>> = api::handler_group(&mount.group)
            .with_context(|| {
                format!(
                    "Unknown handler group '{}' for prefix '{}' (known groups: {})",
                    mount.group,
                    mount.prefix,
                    api::GROUP_NAMES.join(", ")
                )
            })?;

        builder
            .register(&mount.prefix, mount.visibility, group.as_ref())
            .with_context(|| format!("Failed to mount '{}' at '{}'", mount.group, mount.prefix))?;
    }

    let aggregator: RouteAggregator = builder.build();
    info!("Route table ready with {} binding(s)", aggregator.bindings().len());

    Ok(aggregator)
}

/// Creates the application router: the aggregator behind the global middleware layers
pub fn create_app(env: &EnvironmentVariables, aggregator: RouteAggregator) -> Router {
    let request_timeout: Duration = Duration::from_secs(env.default_timeout_seconds);

    Router::new()
        .fallback_service(aggregator)
        .layer(
            ServiceBuilder::new()
                // The timeout layer only covers the response head; the wrapper bounds body reads
                .layer(from_fn_with_state(request_timeout, response_wrapper))
                .layer(HandleErrorLayer::new(handle_global_error))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(DefaultBodyLimit::max(env.max_request_body_size))
        )
}

/// Sets up the TCP listener from environment or binds to new address
pub async fn setup_listener(env: &EnvironmentVariables) -> Result<TcpListener> {
    let mut listenfd: ListenFd = ListenFd::from_env();

    let listener: TcpListener = match listenfd.take_tcp_listener(0)? {
        Some(std_listener) => {
            std_listener.set_nonblocking(true)?;
            TcpListener::from_std(std_listener)?
        }
        None => {
            let addr: String = format!("{}:{}", env.host, env.port);
            TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?
        }
    };

    Ok(listener)
}

/// Handles graceful shutdown signals (Ctrl+C and TERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Terminate signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutting down via Ctrl+C"),
        _ = terminate => tracing::info!("Shutting down via TERM signal"),
    }
}
