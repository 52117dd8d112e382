use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use shared::TimeSource;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{info, warn, Level};

use crate::config::Config;
use crate::store::LotteryStore;

mod config;
mod error;
mod logging;
mod routes;
mod session;
mod store;

/// Wall clock of the server, the reference the page reconciles against.
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<LotteryStore>,
    clock: Arc<dyn TimeSource + Send + Sync>,
}

pub async fn health_check() -> impl IntoResponse {
    "OK"
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring malformed origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(vec![Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(vec![header::CONTENT_TYPE])
        .allow_credentials(true)
}

fn app(config: &Config, state: AppState) -> Router {
    let index = config.frontend_dist.join("index.html");
    let frontend = SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache"),
    )
    .layer(ServeDir::new(&config.frontend_dist).fallback(ServeFile::new(index)));

    Router::new()
        .merge(routes::create_router())
        .merge(session::create_router())
        .route("/health", get(health_check))
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO)))
        .layer(cors_layer(&config.allowed_origins))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_path(".env").ok();
    logging::setup()?;

    let config = Config::from_env()?;
    info!(
        "Serving lottery {} open from {} to {}",
        config.lottery.id, config.lottery.start, config.lottery.end
    );

    let state = AppState {
        store: Arc::new(LotteryStore::new([config.lottery.clone()])),
        clock: Arc::new(SystemClock),
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app(&config, state)).await?;

    Ok(())
}
