// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FlexAI API Server
//!
//! Generates fitness plans from questionnaires through a chat-completion
//! service and tracks challenge points per user.

use flexai_api::{
    config::{Config, StoreBackend},
    db::{FirestoreDb, FitnessStore, MemoryDb},
    services::{CompletionService, OpenAiClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting FlexAI API");

    let store: Arc<dyn FitnessStore> = match config.store_backend {
        StoreBackend::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryDb::new())
        }
    };

    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; plan generation will fail");
    }
    let completion: Arc<dyn CompletionService> = Arc::new(OpenAiClient::from_config(&config));
    tracing::info!(
        model = %config.openai_model,
        base_url = %config.openai_base_url,
        "Completion client initialized"
    );

    let addr = format!("{}:{}", config.bind_address, config.port);

    let state = Arc::new(AppState {
        config,
        store,
        completion,
    });

    let app = flexai_api::routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("flexai_api=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
