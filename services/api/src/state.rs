//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the resources
//! every request handler reads: the agent handle, the model to run it with,
//! and the static file root.

use fitplan_core::agent_client::AgentClient;
use std::path::PathBuf;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
/// Nothing in it is mutated after construction.
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<dyn AgentClient>,
    pub chat_model: String,
    pub public_dir: PathBuf,
}
