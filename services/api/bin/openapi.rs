//! Writes the Fitplan OpenAPI document to disk.
//!
//! Usage: `openapi [OUTPUT]`, defaulting to `openapi.json` in the current
//! directory.

use anyhow::Context;
use fitplan_api::router::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());

    let spec_json = ApiDoc::openapi()
        .to_pretty_json()
        .context("Failed to serialize OpenAPI document")?;
    std::fs::write(&path, spec_json).with_context(|| format!("Failed to write {path}"))?;

    println!("Wrote {path}");
    Ok(())
}
