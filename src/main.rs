use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use dotenvy::dotenv;

use user_api::app::create_app;
use user_api::config::{AppConfig, StoreBackend};
use user_api::db::pool::{create_pool, run_migrations};
use user_api::state::SharedAppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  let config = AppConfig::from_env()?;
  init_tracing(&config);

  let app_state = match config.store_backend {
    StoreBackend::Postgres => {
      let pool = create_pool(&config).await?;
      run_migrations(&pool).await?;
      SharedAppState::with_pool(pool, config.clone())
    }
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory store; data is lost on shutdown");
      SharedAppState::in_memory(config.clone())
    }
  };
  let app = create_app(app_state);

  let addr = config.socket_addr()?;
  let listener = tokio::net::TcpListener::bind(addr)
    .await
    .with_context(|| format!("bind {}", addr))?;

  tracing::info!("Server running on http://{}", addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("serve http")?;

  Ok(())
}

fn init_tracing(config: &AppConfig) {
  let env_filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

  if config.json_logs {
    tracing_subscriber::fmt()
      .with_env_filter(env_filter)
      .with_target(false)
      .json()
      .init();
  } else {
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
  }
}

async fn shutdown_signal() {
  let ctrl_c = async {
    signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("Failed to install signal handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Received termination signal, shutting down gracefully...");
}
