// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge points routes.

use crate::error::{AppError, Result};
use crate::models::account::POINTS_PER_CHALLENGE;
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const USER_NOT_FOUND: &str = "User not found";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/complete_challenge", post(complete_challenge))
        .route("/get_points", get(get_points))
}

/// Email carried in the body or the query string.
#[derive(Deserialize)]
struct EmailParams {
    email: Option<String>,
}

impl EmailParams {
    /// The email exactly as sent; blank values are rejected.
    fn require_email(self) -> Result<String> {
        self.email
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("email is required".to_string()))
    }
}

#[derive(Serialize)]
pub struct ChallengeResponse {
    pub message: String,
    pub points: i64,
}

#[derive(Serialize)]
pub struct PointsResponse {
    pub points: i64,
}

/// Award points for a completed challenge.
async fn complete_challenge(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<EmailParams>, JsonRejection>,
) -> Result<Json<ChallengeResponse>> {
    let Json(params) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let email = params.require_email()?;

    let points = state
        .store
        .add_points(&email, POINTS_PER_CHALLENGE)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

    tracing::info!(email = %email, points, "Challenge completed");

    Ok(Json(ChallengeResponse {
        message: "Points updated".to_string(),
        points,
    }))
}

/// Current points for an account.
async fn get_points(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<EmailParams>, QueryRejection>,
) -> Result<Json<PointsResponse>> {
    let Query(params) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let email = params.require_email()?;

    let account = state
        .store
        .find_account(&email)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

    Ok(Json(PointsResponse {
        points: account.points,
    }))
}
