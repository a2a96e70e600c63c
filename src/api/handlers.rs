use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use crate::AppState;

use super::models::{ErrorResponse, HealthResponse, SolveParams};

const ASK_SYSTEM_PROMPT: &str = "You are a helpful AI assistant. Be concise and clear. Do not use emojis. Provide brief, accurate answers suitable for displaying on a calculator screen.";

const SOLVE_SYSTEM_PROMPT: &str = "You are a helpful math tutor. Provide answers as succinctly as possible. Be as accurate as possible. Only provide the answer, no explanation.";

const NO_RESPONSE: &str = "no response";

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        model: state.ollama.model().to_string(),
    })
}

pub async fn ask(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let Some(question) = question_param(&params) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let request = state.ollama.chat_request(ASK_SYSTEM_PROMPT, &question);
    match state.ollama.chat(&request).await {
        Ok(answer) => answer.unwrap_or_else(|| NO_RESPONSE.to_string()).into_response(),
        Err(err) => {
            error!("ollama error: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error connecting to Ollama").into_response()
        }
    }
}

pub async fn solve(
    State(state): State<AppState>,
    Query(params): Query<SolveParams>,
    body: String,
) -> Response {
    let prompt = solve_prompt(params.n.as_deref(), &body);
    info!("math solve prompt: {prompt}");

    let request = state.ollama.chat_request(SOLVE_SYSTEM_PROMPT, &prompt);
    match state.ollama.chat(&request).await {
        Ok(answer) => answer.unwrap_or_else(|| NO_RESPONSE.to_string()).into_response(),
        Err(err) => {
            error!("ollama error: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error solving problem").into_response()
        }
    }
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "route not found".to_string(),
        }),
    )
        .into_response()
}

/// Extracts the `question` parameter from the decoded query pairs.
/// Returns `None` when the parameter is repeated (the request is
/// malformed); an absent parameter yields the empty string.
fn question_param(params: &[(String, String)]) -> Option<String> {
    let mut values = params.iter().filter(|(key, _)| key == "question");

    let first = values.next();
    if values.next().is_some() {
        return None;
    }

    Some(first.map(|(_, value)| value.clone()).unwrap_or_default())
}

/// A non-empty body is the prompt verbatim; the question number is only a
/// fallback for empty bodies.
fn solve_prompt(n: Option<&str>, body: &str) -> String {
    if !body.is_empty() {
        return body.to_string();
    }

    match n {
        Some(n) if !n.is_empty() => format!("Solve question number {n}."),
        _ => "Solve this math problem.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{question_param, solve_prompt};

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn single_question_is_accepted() {
        let params = pairs(&[("question", "What is 2+2")]);
        assert_eq!(question_param(&params).as_deref(), Some("What is 2+2"));
    }

    #[test]
    fn absent_question_defaults_to_empty_string() {
        assert_eq!(question_param(&[]).as_deref(), Some(""));
    }

    #[test]
    fn repeated_question_is_rejected() {
        let params = pairs(&[("question", "x"), ("question", "y")]);
        assert!(question_param(&params).is_none());
    }

    #[test]
    fn unrelated_parameters_are_ignored() {
        let params = pairs(&[("foo", "bar"), ("question", "hi")]);
        assert_eq!(question_param(&params).as_deref(), Some("hi"));
    }

    #[test]
    fn body_takes_precedence_over_question_number() {
        assert_eq!(solve_prompt(Some("3"), "2x+1=5"), "2x+1=5");
    }

    #[test]
    fn empty_body_falls_back_to_question_number() {
        assert_eq!(solve_prompt(Some("3"), ""), "Solve question number 3.");
    }

    #[test]
    fn empty_body_without_number_uses_generic_prompt() {
        assert_eq!(solve_prompt(None, ""), "Solve this math problem.");
        assert_eq!(solve_prompt(Some(""), ""), "Solve this math problem.");
    }
}
