use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Query parameters accepted by `POST /gpt/solve`. `n` is relayed into
/// the prompt verbatim, never parsed as a number.
#[derive(Debug, Deserialize)]
pub struct SolveParams {
    pub n: Option<String>,
}
