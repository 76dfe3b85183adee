use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use careroute::engine::Engine;
use careroute::oracle::{AdvisoryOracle, NoopOracle, OllamaOracle};
use careroute::tickets::TracingNotifier;
use careroute::{api, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let oracle: Arc<dyn AdvisoryOracle> = match config::oracle_base_url() {
        Some(url) => {
            let model = config::oracle_model();
            tracing::info!(url = %url, model = %model, "advisory oracle enabled");
            Arc::new(OllamaOracle::new(&url, &model, config::ORACLE_TIMEOUT_SECS)?)
        }
        None => {
            tracing::info!("no advisory oracle configured, running deterministic-only");
            Arc::new(NoopOracle)
        }
    };

    let engine = Arc::new(Engine::new(oracle, Arc::new(TracingNotifier)));
    let app = api::api_router(engine);

    let addr = config::bind_addr();
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
