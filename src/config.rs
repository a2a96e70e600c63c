use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("bad port")]
    BadPort,
}

/// Process-wide configuration, read once at startup and passed into the
/// components that need it. Handlers never touch the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub ollama_url: String,
    pub model: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_port(env::var("PORT").ok().as_deref())?;

        let ollama_url =
            env::var("OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".to_string());
        let model =
            env::var("OLLAMA_MODEL").unwrap_or_else(|_| "deepseek-r1:latest".to_string());

        Ok(Self {
            port,
            ollama_url,
            model,
        })
    }
}

/// The port has no default; anything that is not a positive integer in
/// range is a fatal startup error.
fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    let port = raw
        .and_then(|value| value.parse::<u16>().ok())
        .ok_or(ConfigError::BadPort)?;

    if port == 0 {
        return Err(ConfigError::BadPort);
    }

    Ok(port)
}
