//! API Models
//!
//! Request and response bodies for the plan endpoints, annotated for
//! OpenAPI generation with `utoipa`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema, Debug)]
pub struct PlanRequest {
    #[schema(example = "lose weight")]
    pub goal: String,
    /// Most training days allowed per week.
    #[schema(example = 3)]
    pub days: u32,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct EditRequest {
    /// The plan as last returned to the client.
    #[schema(example = "Day,Focus,Exercise 1,Exercise 2,Exercise 3,Optional Notes\nMonday,Rest Day,Rest,Rest,Rest,Walk")]
    pub csv: String,
    #[schema(example = "add a leg day")]
    pub instructions: String,
}

/// The agent's output, untouched, plus a short transcript of the exchange.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct PlanResponse {
    pub csv: String,
    pub log: Vec<String>,
}

impl PlanResponse {
    pub fn generated(request: &PlanRequest, csv: String) -> Self {
        Self {
            csv,
            log: vec![
                format!(
                    "User: Generate plan (goal=\"{}\", days={})",
                    request.goal, request.days
                ),
                "Agent: Plan CSV received.".to_string(),
            ],
        }
    }

    pub fn edited(request: &EditRequest, csv: String) -> Self {
        Self {
            csv,
            log: vec![
                format!("User: Edit plan (\"{}\")", request.instructions),
                "Agent: Updated plan CSV received.".to_string(),
            ],
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}
