use std::env;

use anyhow::Result;
use tripsmith_api::build_app;
use tripsmith_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("tripsmith_api");

    let bind = env::var("TRIPSMITH_BIND").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    let app = build_app()?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(bind = %bind, "trip planner api started");

    axum::serve(listener, app).await?;
    Ok(())
}
