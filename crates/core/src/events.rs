/// Events an agent emits while working on a task, in the order they arrive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    /// A chunk of generated text.
    Text(String),
    /// Token accounting reported by the provider.
    Usage {
        input_tokens: u32,
        output_tokens: u32,
    },
    /// The provider stopped generating, with its stated reason.
    Finished { reason: String },
}

/// Failures raised while starting or draining an agent task.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    #[error("failed to start agent task: {0}")]
    Request(String),
    #[error("agent event stream failed: {0}")]
    Stream(String),
}
