//! Task runner: drains an agent's event stream into the final text.

use crate::agent_client::AgentClient;
use crate::events::{AgentError, AgentEvent};
use futures::StreamExt;
use tracing::debug;

/// Runs `prompt` on `model` and returns the concatenated text output.
///
/// Text events are appended in the order they arrive; every other event is
/// ignored. A stream that ends without text yields an empty string. The first
/// failure, whether starting the task or mid-stream, is returned as is.
pub async fn run_task_to_text(
    agent: &dyn AgentClient,
    prompt: &str,
    model: &str,
) -> Result<String, AgentError> {
    let mut events = agent.run_task(prompt, model).await?;
    let mut text = String::new();

    while let Some(event) = events.next().await {
        match event? {
            AgentEvent::Text(chunk) => text.push_str(&chunk),
            other => debug!(event = ?other, "Ignoring non-text agent event"),
        }
    }

    Ok(text)
}
