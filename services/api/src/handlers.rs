//! Axum Handlers for the Plan API
//!
//! Each handler builds a prompt from the request, runs it through the agent,
//! and returns the buffered output. Failures are mapped to JSON error bodies
//! through `ApiError`.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use fitplan_core::{
    prompt::{build_create_prompt, build_edit_prompt},
    task::run_task_to_text,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    models::{EditRequest, ErrorResponse, PlanRequest, PlanResponse},
    state::AppState,
};

pub enum ApiError {
    BadRequest(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::InternalServerError(err.into())
    }
}

/// Decodes a JSON request body whatever its declared content type.
///
/// Any body that is not the expected JSON shape is the client's fault.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))
}

/// Generate a new one-week workout plan.
#[utoipa::path(
    post,
    path = "/api/plan",
    request_body = PlanRequest,
    responses(
        (status = 200, description = "Plan generated", body = PlanResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "Agent failure", body = ErrorResponse)
    )
)]
pub async fn create_plan(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PlanResponse>, ApiError> {
    let request: PlanRequest = parse_body(&body)?;
    info!(goal = %request.goal, days = request.days, "Generating plan");

    let prompt = build_create_prompt(&request.goal, request.days);
    let csv = run_task_to_text(state.agent.as_ref(), &prompt, &state.chat_model).await?;

    info!(bytes = csv.len(), "Plan generated");
    Ok(Json(PlanResponse::generated(&request, csv)))
}

/// Apply natural-language edits to an existing plan.
#[utoipa::path(
    post,
    path = "/api/plan/edit",
    request_body = EditRequest,
    responses(
        (status = 200, description = "Plan updated", body = PlanResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "Agent failure", body = ErrorResponse)
    )
)]
pub async fn edit_plan(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PlanResponse>, ApiError> {
    let request: EditRequest = parse_body(&body)?;
    info!(instructions = %request.instructions, "Editing plan");

    let prompt = build_edit_prompt(&request.csv, &request.instructions);
    let csv = run_task_to_text(state.agent.as_ref(), &prompt, &state.chat_model).await?;

    info!(bytes = csv.len(), "Plan updated");
    Ok(Json(PlanResponse::edited(&request, csv)))
}
