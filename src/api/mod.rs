mod handlers;
mod models;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub use handlers::{ask, health, not_found, solve};
pub use models::{ErrorResponse, HealthResponse, SolveParams};

/// Routes mounted under the `/gpt` prefix.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ask", get(ask))
        .route("/solve", post(solve))
}
