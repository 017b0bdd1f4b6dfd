// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use velora::config::Config;
use velora::generation::{GenerationClient, OpenAiClient};
use velora::routes::{build_router, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "velora", about = "Velora generation gateway")]
struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = 3000, env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // A .env file is optional; real deployments set the environment.
    let _ = dotenvy::dotenv();

    let config = match Config::from_env() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            tracing::error!("failed to load config: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        base_url = %config.base_url,
        text_model = %config.text_model,
        vision_model = %config.vision_model,
        "config loaded"
    );

    let generation: Arc<dyn GenerationClient> = Arc::new(OpenAiClient::new(&config));
    let app = build_router(AppState { config, generation });

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind to address");

    tracing::info!(%addr, "velora listening");

    axum::serve(listener, app).await.expect("server error");
}
