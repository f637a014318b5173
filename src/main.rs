use tracing_subscriber::EnvFilter;

use qboard::config::Config;
use qboard::dashboard::server::start_dashboard_server;
use qboard::discovery;
use qboard::queues::QueueRegistry;
use qboard::store::RedisStore;
use qboard::BoardEngine;

#[tokio::main]
async fn main() {
    let config = Config::load();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!(
        "qboard starting (variant: {}, prefix: '{}')",
        config.bull.variant.as_str(),
        config.bull.prefix
    );

    let store = RedisStore::connect(&config.redis).await;

    // One discovery pass, awaited before the listener binds: the server
    // never accepts requests against a half-built registry.
    let handles = discovery::discover(&store, &config.bull).await;
    let registry = QueueRegistry::new(handles);
    if registry.is_empty() {
        tracing::warn!(
            "No queues discovered under prefix '{}'; the board starts empty",
            config.bull.prefix
        );
    }

    let engine = BoardEngine::new(config, store, registry);
    start_dashboard_server(engine).await;
}
