//! Fitplan core library.
//!
//! Everything the HTTP service needs to talk to the planning agent: the
//! agent client abstraction and its provider implementation, the event model
//! the agent streams back, the prompt templates, and the task runner that
//! collapses an event stream into the final plan text.

pub mod agent_client;
pub mod events;
pub mod prompt;
pub mod task;
