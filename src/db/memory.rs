// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store for tests and `STORE_BACKEND=memory` local runs.

use crate::db::FitnessStore;
use crate::error::AppError;
use crate::models::{PlanRecord, UserAccount};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Process-local store. Accounts are keyed by email.
#[derive(Default)]
pub struct MemoryDb {
    plans: DashMap<String, PlanRecord>,
    accounts: DashMap<String, UserAccount>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace an account.
    pub fn upsert_account(&self, account: UserAccount) {
        self.accounts.insert(account.email.clone(), account);
    }

    pub fn plan_count(&self) -> usize {
        self.plans.len()
    }
}

#[async_trait]
impl FitnessStore for MemoryDb {
    async fn insert_plan(&self, record: &PlanRecord) -> Result<(), AppError> {
        match self.plans.entry(record.id.clone()) {
            Entry::Occupied(_) => Err(AppError::Database(format!(
                "Plan {} already exists",
                record.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn get_plan(&self, id: &str) -> Result<Option<PlanRecord>, AppError> {
        Ok(self.plans.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_account(&self, email: &str) -> Result<Option<UserAccount>, AppError> {
        Ok(self.accounts.get(email).map(|entry| entry.value().clone()))
    }

    async fn add_points(&self, email: &str, amount: i64) -> Result<Option<i64>, AppError> {
        // The shard write lock is held for the whole read-modify-write.
        Ok(self.accounts.get_mut(email).map(|mut entry| {
            entry.points += amount;
            entry.points
        }))
    }
}
