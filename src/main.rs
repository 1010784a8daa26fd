mod config;
mod errors;
mod routes;

use tracing::info;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docugenie=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    if !config.index_path().is_file() {
        tracing::warn!(
            "No SPA build at {}; run `trunk build` in frontend/ first",
            config.dist_dir.display()
        );
    }

    let app = routes::router(&config);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Serving {} on http://{addr}/", config.dist_dir.display());

    axum::serve(listener, app).await?;
    Ok(())
}
