// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Plans (generated fitness plans, keyed by plan ID)
//! - Users (pre-existing accounts, looked up by email)

use crate::db::{collections, FitnessStore};
use crate::error::AppError;
use crate::models::{PlanRecord, UserAccount};
use async_trait::async_trait;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator does not check credentials; skip the ambient Google
        // credential lookup entirely.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline client. Every operation returns a database error.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Account Operations ──────────────────────────────────────

    /// Create or replace an account.
    ///
    /// Accounts are normally provisioned outside this service; this exists to
    /// seed the emulator and local environments. The document ID is the
    /// URL-encoded email.
    pub async fn upsert_account(&self, account: &UserAccount) -> Result<(), AppError> {
        let doc_id = urlencoding::encode(&account.email);
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(doc_id.to_string())
            .object(account)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get an account by its document ID.
    pub async fn get_account_by_doc_id(
        &self,
        doc_id: &str,
    ) -> Result<Option<UserAccount>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(doc_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment an account's points with a server-side field transform so
    /// concurrent completions never overwrite each other.
    ///
    /// The write requires the document to exist; returns `None` if it does
    /// not, without creating it.
    pub async fn increment_points(
        &self,
        doc_id: &str,
        amount: i64,
    ) -> Result<Option<i64>, AppError> {
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .precondition(firestore::FirestoreWritePrecondition::Exists(true))
            .document_id(doc_id)
            .transforms(|t| t.fields([t.field("points").increment(amount)]))
            .only_transform()
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add increment to transaction: {}", e))
            })?;

        if let Err(e) = transaction.commit().await {
            // The precondition fails when the account was deleted after lookup.
            if self.get_account_by_doc_id(doc_id).await?.is_none() {
                tracing::warn!(doc_id = %doc_id, "Account removed before points were added");
                return Ok(None);
            }
            return Err(AppError::Database(format!("Transaction commit failed: {}", e)));
        }

        // Read back after commit; concurrent increments that committed in
        // between are included in the total.
        let updated = self.get_account_by_doc_id(doc_id).await?.ok_or_else(|| {
            AppError::Database(format!("Account {} disappeared after update", doc_id))
        })?;

        Ok(Some(updated.points))
    }
}

#[async_trait]
impl FitnessStore for FirestoreDb {
    // ─── Plan Operations ─────────────────────────────────────────

    async fn insert_plan(&self, record: &PlanRecord) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::PLANS)
            .document_id(&record.id)
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn get_plan(&self, id: &str) -> Result<Option<PlanRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PLANS)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Account Operations ──────────────────────────────────────

    async fn find_account(&self, email: &str) -> Result<Option<UserAccount>, AppError> {
        let email = email.to_string();

        let accounts: Vec<UserAccount> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.field("email").eq(email.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(accounts.into_iter().next())
    }

    async fn add_points(&self, email: &str, amount: i64) -> Result<Option<i64>, AppError> {
        let Some(account) = self.find_account(email).await? else {
            return Ok(None);
        };
        let doc_id = account.doc_id.ok_or_else(|| {
            AppError::Database(format!("Account {} returned without a document ID", email))
        })?;

        self.increment_points(&doc_id, amount).await
    }
}
