mod api;
mod middleware;
mod throttle;

use std::{net::SocketAddr, sync::Arc};

use sentiscope_analysis::Pipeline;
use sentiscope_collect::SourceCollector;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    throttle::ClientThrottle,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = sentiscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let api_status = config.api_status();
    let collector = SourceCollector::from_config(&config)?;
    let state = AppState {
        collector: Arc::new(collector),
        pipeline: Pipeline::default(),
        api_status,
    };
    let app = build_app(
        state,
        &config.allowed_origins,
        ClientThrottle::per_minute(config.rate_limit_per_minute),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        mode = api_status.mode(),
        "sentiscope server listening"
    );
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
