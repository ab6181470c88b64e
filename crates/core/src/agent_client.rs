//! Agent Client
//!
//! The planning agent is an external chat model reached over an
//! OpenAI-compatible streaming API. This module defines the `AgentClient`
//! contract the service depends on, the provider-backed implementation, and a
//! scripted implementation for tests.

use crate::events::{AgentError, AgentEvent};
use anyhow::{Context, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
        CreateChatCompletionStreamResponse, FinishReason,
    },
};
use async_trait::async_trait;
use futures::{Stream, StreamExt, stream};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::sync::Mutex;
use tracing::info;

/// Upper bound on generated tokens for a single task.
const MAX_COMPLETION_TOKENS: u32 = 8192;

/// A finite, ordered stream of events produced by one agent task.
pub type AgentEventStream = Pin<Box<dyn Stream<Item = Result<AgentEvent, AgentError>> + Send>>;

/// A handle to an agent that can run free-text tasks.
///
/// Implementations are shared across concurrent requests, so they must be
/// usable through a shared reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Starts a task for `prompt` on `model` and returns its event stream.
    async fn run_task(&self, prompt: &str, model: &str) -> Result<AgentEventStream, AgentError>;
}

/// The working context an agent is created from.
#[derive(Debug, Clone, Default)]
pub struct AgentContext {
    pub working_dir: PathBuf,
    /// Standing instructions sent ahead of every task, if configured.
    pub system_prompt: Option<String>,
}

impl AgentContext {
    /// Builds a context rooted at `dir`.
    ///
    /// If `<dir>/prompts/system_prompt.md` exists its contents become the
    /// system prompt; otherwise tasks are sent without one.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        let working_dir = dir.into();
        let system_prompt = load_system_prompt(&working_dir)?;
        Ok(Self {
            working_dir,
            system_prompt,
        })
    }
}

fn load_system_prompt(working_dir: &Path) -> Result<Option<String>> {
    let path = working_dir.join("prompts").join("system_prompt.md");
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    info!(path = %path.display(), "Loaded agent system prompt");
    Ok(Some(content))
}

/// An `AgentClient` for any OpenAI-compatible chat completions API
/// (OpenAI itself, Anthropic's and Gemini's compatibility endpoints).
pub struct OpenAICompatibleAgent {
    client: Client<OpenAIConfig>,
    context: AgentContext,
}

impl OpenAICompatibleAgent {
    /// Creates a new agent.
    ///
    /// # Arguments
    ///
    /// * `context` - Working context, including the optional system prompt.
    /// * `config` - Provider configuration: API key and base URL.
    pub fn new(context: AgentContext, config: OpenAIConfig) -> Self {
        Self {
            client: Client::with_config(config),
            context,
        }
    }

    fn messages(&self, prompt: &str) -> Result<Vec<ChatCompletionRequestMessage>, AgentError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system_prompt) = &self.context.system_prompt {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt.as_str())
                    .build()
                    .map_err(|e| AgentError::Request(e.to_string()))?
                    .into(),
            );
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| AgentError::Request(e.to_string()))?
                .into(),
        );
        Ok(messages)
    }
}

#[async_trait]
impl AgentClient for OpenAICompatibleAgent {
    async fn run_task(&self, prompt: &str, model: &str) -> Result<AgentEventStream, AgentError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(self.messages(prompt)?)
            .max_completion_tokens(MAX_COMPLETION_TOKENS)
            .stream(true)
            .build()
            .map_err(|e| AgentError::Request(e.to_string()))?;

        let completions = self
            .client
            .chat()
            .create_stream(request)
            .await
            .map_err(|e| AgentError::Request(e.to_string()))?;

        Ok(Box::pin(completions.flat_map(|result| {
            let batch: Vec<Result<AgentEvent, AgentError>> = match result {
                Ok(chunk) => chunk_events(chunk).into_iter().map(Ok).collect(),
                Err(e) => vec![Err(AgentError::Stream(e.to_string()))],
            };
            stream::iter(batch)
        })))
    }
}

/// Translates one streamed completion chunk into agent events.
fn chunk_events(chunk: CreateChatCompletionStreamResponse) -> Vec<AgentEvent> {
    let mut events = Vec::new();
    for choice in chunk.choices {
        if let Some(content) = choice.delta.content {
            if !content.is_empty() {
                events.push(AgentEvent::Text(content));
            }
        }
        if let Some(reason) = choice.finish_reason {
            events.push(AgentEvent::Finished {
                reason: finish_reason_name(reason).to_string(),
            });
        }
    }
    if let Some(usage) = chunk.usage {
        events.push(AgentEvent::Usage {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
        });
    }
    events
}

/// The provider's wire name for a finish reason.
fn finish_reason_name(reason: FinishReason) -> &'static str {
    match reason {
        FinishReason::Stop => "stop",
        FinishReason::Length => "length",
        FinishReason::ToolCalls => "tool_calls",
        FinishReason::ContentFilter => "content_filter",
        FinishReason::FunctionCall => "function_call",
    }
}

/// An `AgentClient` that replays a fixed script of events.
///
/// Used by tests that exercise the service without a provider account or
/// network access. Every prompt it receives is kept so callers can inspect
/// what would have been sent.
pub struct ScriptedAgent {
    script: Vec<Result<AgentEvent, AgentError>>,
    start_error: Option<AgentError>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedAgent {
    /// Creates an agent that emits `events` for every task.
    pub fn new(events: Vec<AgentEvent>) -> Self {
        Self {
            script: events.into_iter().map(Ok).collect(),
            start_error: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Appends a stream failure after the scripted events.
    pub fn failing_with(mut self, error: AgentError) -> Self {
        self.script.push(Err(error));
        self
    }

    /// Creates an agent whose tasks fail before producing any event.
    pub fn unavailable(error: AgentError) -> Self {
        Self {
            script: Vec::new(),
            start_error: Some(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl AgentClient for ScriptedAgent {
    async fn run_task(&self, prompt: &str, _model: &str) -> Result<AgentEventStream, AgentError> {
        self.prompts.lock().await.push(prompt.to_string());
        if let Some(error) = &self.start_error {
            return Err(error.clone());
        }
        Ok(Box::pin(stream::iter(self.script.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    fn chunk(json: &str) -> CreateChatCompletionStreamResponse {
        serde_json::from_str(json).expect("valid stream chunk")
    }

    #[test]
    fn test_chunk_events_text_finish_and_usage() {
        let events = chunk_events(chunk(
            r#"{
                "id": "chatcmpl-1",
                "object": "chat.completion.chunk",
                "created": 1700000000,
                "model": "claude-sonnet-4-20250514",
                "choices": [{
                    "index": 0,
                    "delta": {"content": "Day,Focus"},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 12, "completion_tokens": 34, "total_tokens": 46}
            }"#,
        ));

        assert_eq!(
            events,
            vec![
                AgentEvent::Text("Day,Focus".to_string()),
                AgentEvent::Finished {
                    reason: "stop".to_string()
                },
                AgentEvent::Usage {
                    input_tokens: 12,
                    output_tokens: 34
                },
            ]
        );
    }

    #[test]
    fn test_chunk_events_skips_empty_content() {
        let events = chunk_events(chunk(
            r#"{
                "id": "chatcmpl-1",
                "object": "chat.completion.chunk",
                "created": 1700000000,
                "model": "gpt-4o",
                "choices": [{"index": 0, "delta": {"role": "assistant", "content": ""}}]
            }"#,
        ));
        assert!(events.is_empty());
    }

    #[test]
    fn test_finish_reasons_keep_provider_names() {
        let events = chunk_events(chunk(
            r#"{
                "id": "chatcmpl-1",
                "object": "chat.completion.chunk",
                "created": 1700000000,
                "model": "gpt-4o",
                "choices": [
                    {"index": 0, "delta": {}, "finish_reason": "content_filter"},
                    {"index": 1, "delta": {}, "finish_reason": "tool_calls"}
                ]
            }"#,
        ));

        assert_eq!(
            events,
            vec![
                AgentEvent::Finished {
                    reason: "content_filter".to_string()
                },
                AgentEvent::Finished {
                    reason: "tool_calls".to_string()
                },
            ]
        );
        assert_eq!(finish_reason_name(FinishReason::FunctionCall), "function_call");
        assert_eq!(finish_reason_name(FinishReason::Length), "length");
    }

    #[test]
    fn test_context_without_prompt_file() {
        let dir = tempfile::tempdir().unwrap();
        let context = AgentContext::from_dir(dir.path()).unwrap();
        assert_eq!(context.working_dir, dir.path());
        assert!(context.system_prompt.is_none());
    }

    #[test]
    fn test_context_loads_system_prompt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("prompts")).unwrap();
        std::fs::write(
            dir.path().join("prompts").join("system_prompt.md"),
            "Always answer in CSV.",
        )
        .unwrap();

        let context = AgentContext::from_dir(dir.path()).unwrap();
        assert_eq!(context.system_prompt.as_deref(), Some("Always answer in CSV."));
    }

    #[test]
    fn test_messages_include_system_prompt_first() {
        let agent = OpenAICompatibleAgent::new(
            AgentContext {
                working_dir: PathBuf::from("."),
                system_prompt: Some("Be brief.".to_string()),
            },
            OpenAIConfig::new().with_api_key("test-key"),
        );

        let messages = agent.messages("Plan my week").unwrap();
        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
    }

    #[tokio::test]
    async fn test_scripted_agent_replays_and_records() {
        let agent = ScriptedAgent::new(vec![
            AgentEvent::Text("a".to_string()),
            AgentEvent::Text("b".to_string()),
        ]);

        for _ in 0..2 {
            let events: Vec<AgentEvent> = agent
                .run_task("first", "model")
                .await
                .unwrap()
                .try_collect()
                .await
                .unwrap();
            assert_eq!(events.len(), 2);
        }
        assert_eq!(agent.prompts().await, vec!["first", "first"]);
    }

    #[tokio::test]
    async fn test_scripted_agent_unavailable() {
        let agent = ScriptedAgent::unavailable(AgentError::Request("down".to_string()));
        let err = agent.run_task("prompt", "model").await.err().unwrap();
        assert_eq!(err, AgentError::Request("down".to_string()));
        assert_eq!(agent.prompts().await, vec!["prompt"]);
    }
}
