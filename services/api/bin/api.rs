//! Main Entrypoint for the Fitplan API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment. A missing credential
//!    aborts startup before anything is bound.
//! 2. Creating the agent client once for the whole process.
//! 3. Constructing the Axum router and applying middleware.
//! 4. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use async_openai::config::OpenAIConfig;
use fitplan_api::{config::Config, router::create_router, state::AppState};
use fitplan_core::agent_client::{AgentClient, AgentContext, OpenAICompatibleAgent};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Starting Fitplan server...");

    // --- 2. Initialize the Agent ---
    let working_dir = std::env::current_dir().context("Failed to resolve working directory")?;
    let context = AgentContext::from_dir(working_dir)?;
    info!(working_dir = %context.working_dir.display(), "Agent context created");

    let openai_config = OpenAIConfig::new()
        .with_api_key(&config.api_key)
        .with_api_base(config.provider.api_base());
    let agent: Arc<dyn AgentClient> = Arc::new(OpenAICompatibleAgent::new(context, openai_config));
    info!(provider = ?config.provider, "Agent created");

    let app_state = Arc::new(AppState {
        agent,
        chat_model: config.chat_model.clone(),
        public_dir: config.public_dir.clone(),
    });

    // --- 3. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 4. Start Server ---
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!(
        model = %config.chat_model,
        public_dir = %config.public_dir.display(),
        "Server is running at http://{}",
        config.bind_address
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server has shut down.");
    Ok(())
}
