// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plan generation routes.

use crate::error::{AppError, Result};
use crate::models::{PlanRecord, UserProfile};
use crate::services::{self, ApiKeyStatus};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/get_plan", post(get_plan))
        .route("/plans/{id}", get(get_plan_by_id))
        .route("/check_api_key", get(check_api_key))
}

/// Generate a fitness plan from a questionnaire and store it.
async fn get_plan(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PlanRecord>> {
    let Json(data) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::debug!(payload = %data, "Received plan request");

    let profile = UserProfile::from_value(data).ok_or_else(|| {
        AppError::BadRequest("Questionnaire must be a JSON object".to_string())
    })?;

    let record =
        services::generate_plan(state.completion.as_ref(), state.store.as_ref(), profile).await?;

    Ok(Json(record))
}

/// Fetch a previously generated plan.
async fn get_plan_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PlanRecord>> {
    let record = state
        .store
        .get_plan(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Plan {} not found", id)))?;

    Ok(Json(record))
}

/// Report whether the completion API key works.
async fn check_api_key(State(state): State<Arc<AppState>>) -> Json<ApiKeyStatus> {
    Json(services::check_api_key(state.completion.as_ref()).await)
}
