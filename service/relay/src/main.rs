use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use fridge_relay::{
    api::router,
    chain::ChainClient,
    config::Config,
    state::AppState,
    storage::StorageClient,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env().unwrap_or_else(|err| {
        tracing::error!(error = %err, "configuration error");
        std::process::exit(1);
    });

    let chain = ChainClient::new(&config).unwrap_or_else(|err| {
        tracing::error!(error = %err, "failed to initialize chain client");
        std::process::exit(1);
    });

    // Refuse to start against the wrong network.
    if let Err(err) = chain.assert_chain_id().await {
        tracing::error!(error = %err, "chain check failed");
        std::process::exit(1);
    }
    tracing::info!(
        chain_id = %chain.chain_id(),
        platform_address = %chain.address(),
        "connected to chain"
    );

    let storage = StorageClient::new(&config);
    let state = AppState::new(chain, storage, config.address_prefix.clone());
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to parse bind address");
            std::process::exit(1);
        });

    tracing::info!(%addr, "relay listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to bind");
            std::process::exit(1);
        });
    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "server failed");
    }
}
