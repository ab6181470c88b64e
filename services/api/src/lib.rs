//! Fitplan API Library Crate
//!
//! This library contains all the logic for the Fitplan web service: the
//! configuration loader, shared state, plan handlers, static file serving
//! and routing. The `api` binary is a thin wrapper around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
pub mod static_files;
