// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plan generation: prompt, completion call, persistence.

use crate::db::FitnessStore;
use crate::error::AppError;
use crate::models::{PlanRecord, UserProfile};
use crate::services::completion::{CompletionRequest, CompletionService};
use crate::services::prompt::{build_plan_prompt, PLAN_SYSTEM_PROMPT};
use crate::time_utils::now_rfc3339;

pub const PLAN_TEMPERATURE: f32 = 0.7;
pub const PLAN_MAX_TOKENS: u32 = 1000;

/// Completion request for a questionnaire.
pub fn plan_request(profile: &UserProfile) -> CompletionRequest {
    CompletionRequest {
        system: PLAN_SYSTEM_PROMPT.to_string(),
        user: build_plan_prompt(profile),
        temperature: Some(PLAN_TEMPERATURE),
        max_tokens: Some(PLAN_MAX_TOKENS),
    }
}

/// Generate a plan for `profile` and store it.
///
/// If the store write fails the generated text is dropped; the caller sees
/// the database error.
pub async fn generate_plan(
    completion: &dyn CompletionService,
    store: &dyn FitnessStore,
    profile: UserProfile,
) -> Result<PlanRecord, AppError> {
    let request = plan_request(&profile);

    let plan = completion
        .complete(&request)
        .await?
        .into_iter()
        .next()
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| AppError::CompletionApi("Completion returned no plan text".to_string()))?;

    let record = PlanRecord {
        id: uuid::Uuid::new_v4().to_string(),
        plan,
        created_at: now_rfc3339(),
        user_data: profile,
    };

    store.insert_plan(&record).await?;
    tracing::info!(plan_id = %record.id, "Saved plan");

    Ok(record)
}
