use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Router,
};
use rust_embed::RustEmbed;
use tower_http::compression::CompressionLayer;

use crate::dashboard::auth;
use crate::dashboard::models::queues::QueueSummary;
use crate::dashboard::models::system::SystemSnapshot;
use crate::BoardEngine;

// Embedded dashboard pages
#[derive(RustEmbed)]
#[folder = "dashboard/dist/"]
struct Assets;

pub async fn start_dashboard_server(engine: BoardEngine) {
    let config = engine.config.clone();

    let mut board = Router::new()
        .route("/api/queues", get(get_queues))
        .route("/api/queues/{name}", get(get_queue))
        .route("/api/system", get(get_system))
        .fallback(static_handler);

    if config.auth.enabled {
        board = board.layer(axum::middleware::from_fn_with_state(
            engine.clone(),
            auth::require_session,
        ));
    }

    // The board mounts under HOME_PAGE; the login routes stay at the root so
    // an unauthenticated user can always reach them.
    let mut app = if config.server.home_page == "/" {
        Router::new().merge(board)
    } else {
        Router::new().nest(&config.server.home_page, board)
    };

    if config.auth.enabled {
        app = app.merge(auth::router(&config));
    }

    let app = app.layer(CompressionLayer::new()).with_state(engine);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind dashboard port");

    tracing::info!(
        "qboard is started http://{}{}",
        addr,
        config.server.home_page
    );

    axum::serve(listener, app)
        .await
        .expect("Failed to start dashboard server");
}

async fn get_queues(State(engine): State<BoardEngine>) -> impl IntoResponse {
    let snapshot = engine.registry.snapshot().await;
    axum::Json(snapshot)
}

async fn get_queue(
    State(engine): State<BoardEngine>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match engine.registry.get(&name) {
        Some(handle) => match handle.counts().await {
            Ok(counts) => axum::Json(QueueSummary { name, counts }).into_response(),
            Err(e) => {
                tracing::warn!("Failed to read counts for queue '{}': {}", name, e);
                (StatusCode::SERVICE_UNAVAILABLE, "Redis unavailable").into_response()
            }
        },
        None => (StatusCode::NOT_FOUND, "Queue not found").into_response(),
    }
}

async fn get_system(State(engine): State<BoardEngine>) -> impl IntoResponse {
    axum::Json(SystemSnapshot {
        uptime_secs: engine.start_time.elapsed().as_secs(),
        redis_connected: engine.store.is_connected(),
        queue_variant: engine.config.bull.variant.as_str().to_string(),
        bull_prefix: engine.config.bull.prefix.clone(),
        queue_count: engine.registry.len(),
        started_at: engine.started_at.to_rfc3339(),
    })
}

// Serves the embedded static pages; unmatched paths fall back to index.html.
async fn static_handler(uri: Uri) -> impl IntoResponse {
    let mut path = uri.path().trim_start_matches('/').to_string();

    if path.is_empty() {
        path = "index.html".to_string();
    }

    match Assets::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref())],
                Body::from(content.data),
            )
                .into_response()
        }
        None => match Assets::get("index.html") {
            Some(content) => {
                let mime = mime_guess::from_path("index.html").first_or_octet_stream();
                (
                    [(header::CONTENT_TYPE, mime.as_ref())],
                    Body::from(content.data),
                )
                    .into_response()
            }
            None => (StatusCode::NOT_FOUND, "Dashboard assets missing").into_response(),
        },
    }
}
