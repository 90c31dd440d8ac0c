//! Counsel API server binary.
//!
//! Env: `SERVE_ADDR` (default 127.0.0.1:8000), plus the `OPENAI_*` / `AGENT_*`
//! variables read by `AgentConfig::from_env` (via .env or
//! ~/.config/counsel/config.toml).

use counsel::runner::build_openai_graph;
use counsel::settings::AgentConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Err(e) = env_config::load_and_apply("counsel", None) {
        eprintln!("config load failed: {}", e);
    }
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AgentConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; chat requests will fail");
    }

    let graph = build_openai_graph(&config).await?;
    let addr = std::env::var("SERVE_ADDR").ok();
    counsel_serve::run_serve(addr.as_deref(), graph).await
}
