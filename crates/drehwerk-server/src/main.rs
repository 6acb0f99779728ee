// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Drehwerk — batch PDF label processor.
//
// Entry point. Initialises logging, loads the environment configuration, and
// serves the HTTP API.

mod error;
mod http;
mod state;

use drehwerk_core::AppConfig;
use drehwerk_core::error::Result;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Drehwerk starting");

    let config = AppConfig::from_env();
    let port = config.port;
    let app = http::build_router(AppState::new(config));

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
