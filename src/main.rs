use ollama_gateway::{build_app, config::AppConfig, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let app = build_app(AppState::new(&config));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("bind failed");

    info!("gateway listening on port {}", config.port);
    info!("make sure ollama is running on {}", config.ollama_url);

    axum::serve(listener, app).await.expect("server failed");
}
