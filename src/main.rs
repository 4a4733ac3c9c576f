use {
    route_gateway::{
        AppState, adapters::backend_client::HttpBackendClient, adapters::http, config::Config,
        infra::sqlite::audit_repo::AuditStore,
    },
    std::sync::Arc,
    tokio::signal,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("invalid configuration");

    let store = AuditStore::connect(&config.database_url)
        .await
        .expect("failed to open audit store");

    let backend = HttpBackendClient::new(&config.backend_url, config.backend_timeout)
        .expect("failed to build backend http client");
    tracing::info!(endpoint = backend.endpoint(), "optimization backend configured");

    let state = AppState {
        store: store.clone(),
        backend: Arc::new(backend),
    };

    let app = http::router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    tracing::info!(
        "gateway listening on {addr}, proxying to {}",
        config.backend_url
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    store.close().await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
