//! Binary entrypoint for the NEO API.

use std::net::SocketAddr;
use std::sync::Arc;

use neo_api::AppState;
use neo_engine::{Config, Engine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "neo_api=info,neo_engine=info,tower_http=info".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let port: u16 = std::env::var("PORT").unwrap_or_else(|_| "5005".into()).parse()?;

  let config = Config::from_env();
  tracing::info!(risk_feed_top_n = config.risk_feed_top_n, "configuration loaded");
  let state = Arc::new(AppState {
    engine: Engine::new(config),
  });

  let addr = SocketAddr::from(([127, 0, 0, 1], port));
  tracing::info!("neo-api listening on http://{}", addr);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, neo_api::router(state)).await?;

  Ok(())
}
