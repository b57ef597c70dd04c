// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore, plus an in-memory store for tests and local runs).

pub mod firestore;
pub mod memory;

pub use self::firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{PlanRecord, UserAccount};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    /// User accounts (points counter, looked up by email)
    pub const USERS: &str = "users";
    /// Generated plans (keyed by plan ID)
    pub const PLANS: &str = "plans";
}

/// Storage operations used by the HTTP handlers.
#[async_trait]
pub trait FitnessStore: Send + Sync {
    /// Persist a newly generated plan under `record.id`.
    async fn insert_plan(&self, record: &PlanRecord) -> Result<(), AppError>;

    /// Get a plan by ID.
    async fn get_plan(&self, id: &str) -> Result<Option<PlanRecord>, AppError>;

    /// Find an account by exact email match.
    async fn find_account(&self, email: &str) -> Result<Option<UserAccount>, AppError>;

    /// Atomically add `amount` to an account's points.
    ///
    /// Returns the new total, or `None` (with nothing written) if no account
    /// has this email.
    async fn add_points(&self, email: &str, amount: i64) -> Result<Option<i64>, AppError>;
}
