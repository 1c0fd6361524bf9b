use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use weather_core::{Config, provider_from_config};

use crate::routes::{self, AppState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather planner proxy server")]
pub struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    /// Directory holding the pre-built front-end bundle.
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,

    /// Config file; defaults to the platform config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load(self.config.as_deref())?;
        tracing::info!(base_url = %config.base_url, "configuration loaded");

        let state = AppState {
            provider: provider_from_config(&config),
        };

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        // ServeDir answers `/` with index.html.
        let app = routes::router(state)
            .fallback_service(ServeDir::new(&self.static_dir))
            .layer(cors);

        let addr = format!("{}:{}", self.host, self.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        tracing::info!("Web server running at http://{addr}");
        axum::serve(listener, app).await.context("Server error")?;

        Ok(())
    }
}
