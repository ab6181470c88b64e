//! Axum Router Configuration
//!
//! The two plan endpoints, the OpenAPI documentation, and a static file
//! fallback for everything else. Unsupported methods on the plan paths fall
//! through to the static server too, so they end in a 404 rather than a 405.

use crate::{
    handlers,
    models::{EditRequest, ErrorResponse, PlanRequest, PlanResponse},
    state::AppState,
    static_files::serve_static,
};

use axum::{Router, routing::post};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::create_plan, handlers::edit_plan),
    components(schemas(PlanRequest, EditRequest, PlanResponse, ErrorResponse)),
    tags(
        (name = "Fitplan API", description = "Weekly workout plans generated and edited by an LLM agent")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let app_router = Router::new()
        .route(
            "/api/plan",
            post(handlers::create_plan).fallback(serve_static),
        )
        .route(
            "/api/plan/edit",
            post(handlers::edit_plan).fallback(serve_static),
        )
        .fallback(serve_static)
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(app_router)
}
