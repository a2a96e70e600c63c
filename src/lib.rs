pub mod api;
pub mod config;
pub mod ollama;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, Level};

use crate::config::AppConfig;
use crate::ollama::OllamaClient;

#[derive(Clone)]
pub struct AppState {
    pub ollama: OllamaClient,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            ollama: OllamaClient::new(&config.ollama_url, &config.model),
        }
    }
}

/// Assembles the full application: health check, the `/gpt` proxy routes,
/// and the middleware chain (access log, permissive CORS, authorization
/// observer) applied to every route.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .nest("/gpt", api::router())
        .fallback(api::not_found)
        .layer(middleware::from_fn(log_authorization))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Diagnostic only: the header is logged as-is and never validated.
/// Nothing in the gateway enforces authorization.
async fn log_authorization(request: Request, next: Next) -> Response {
    debug!("authorization: {:?}", request.headers().get("authorization"));
    next.run(request).await
}
