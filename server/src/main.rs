use duel_client::{
    backend::HttpBackend,
    config::Config,
    program::{ProgramClient, RpcProgramClient},
};
use duel_server::{
    routes::{self, AppState},
    session::{session_router, SessionStore},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let cors = duel_server::cors(&config.cors_origins)?;

    // Without a signing key there is nothing to serve.
    let client = RpcProgramClient::from_config(&config)?;
    info!(payer = %client.payer(), rpc = %config.rpc_url, "Loaded server signer");
    let backend = HttpBackend::from_config(&config);

    if let Some(addr) = config.session_listen {
        let listener = TcpListener::bind(addr).await?;
        let app = session_router(SessionStore::default()).layer(cors.clone());
        info!("Session service listening on {}", addr);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("Session service stopped: {}", e);
            }
        });
    }

    let app = routes::router(AppState::new(client, backend))
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    let listener = TcpListener::bind(config.listen).await?;
    info!("Listening on {}", config.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for ctrl-c: {}", e);
    }
    info!("Shutting down");
}
