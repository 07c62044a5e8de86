//! Action recording route

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth;
use crate::error::{ApiError, ApiResult, FieldError};
use crate::state::AppState;
use engine::ActionOutcome;

fn default_metadata() -> serde_json::Value {
    serde_json::json!({})
}

#[derive(Deserialize)]
pub struct RecordActionBody {
    pub action_type: String,
    /// Optional explicit target; must belong to the caller
    pub profile_id: Option<Uuid>,
    #[serde(default = "default_metadata")]
    pub metadata: serde_json::Value,
}

/// Record a user action and apply its gamification effects
pub async fn record(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<RecordActionBody>,
) -> ApiResult<Json<ActionOutcome>> {
    if body.action_type.trim().is_empty() {
        return Err(ApiError::Validation(vec![FieldError::new(
            "action_type",
            "must be a non-empty string",
        )]));
    }

    let caller = auth::require_profile(&state, &headers).await?;

    if let Some(profile_id) = body.profile_id {
        if profile_id != caller.id {
            return Err(ApiError::Forbidden(
                "Cannot record actions for another profile".to_string(),
            ));
        }
    }

    let outcome = state
        .pipeline
        .record(&caller, body.action_type.trim(), body.metadata)
        .await?;

    Ok(Json(outcome))
}
