pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use pneuscope_core::Assessor;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::ServiceConfig;

#[derive(Debug, Clone)]
pub struct AppState {
    pub assessor: Assessor,
}

/// CORS a partir de la lista de orígenes configurada; `*` abre a cualquiera (sin credenciales).
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o.trim() == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.trim().parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(e) => {
                warn!(origin = %o, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

pub fn app(cfg: &ServiceConfig) -> Router {
    let state = AppState {
        assessor: Assessor::new(cfg.assessor.clone()),
    };

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .route("/predict/batch", post(handlers::predict_batch))
        .layer(DefaultBodyLimit::max(cfg.max_body_bytes))
        .layer(cors_layer(&cfg.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
