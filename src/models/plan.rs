// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generated plan model for storage and API.

use crate::models::UserProfile;
use serde::{Deserialize, Serialize};

/// Plan record stored in the `plans` collection and returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    /// Generated identifier (also used as document ID)
    pub id: String,
    /// Plan text as produced by the completion service
    pub plan: String,
    /// When the plan was generated (RFC 3339)
    pub created_at: String,
    /// The questionnaire exactly as submitted
    pub user_data: UserProfile,
}
