// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User account model (points tracking).

use serde::{Deserialize, Serialize};

/// Points awarded for each completed challenge.
pub const POINTS_PER_CHALLENGE: i64 = 10;

/// Pre-existing user account stored in the `users` collection.
///
/// Accounts are created elsewhere; this service only reads and increments
/// the points counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    /// Store document ID (filled in by Firestore on reads, never written)
    #[serde(default, alias = "_firestore_id", skip_serializing)]
    pub doc_id: Option<String>,
    /// Email address (lookup key)
    pub email: String,
    /// Challenge points. Missing on older accounts, which count as zero.
    #[serde(default)]
    pub points: i64,
}

impl UserAccount {
    pub fn new(email: impl Into<String>, points: i64) -> Self {
        Self {
            doc_id: None,
            email: email.into(),
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_points_default_to_zero() {
        let account: UserAccount =
            serde_json::from_value(serde_json::json!({ "email": "a@b.com" })).unwrap();
        assert_eq!(account.points, 0);
        assert_eq!(account.doc_id, None);
    }

    #[test]
    fn test_doc_id_not_serialized() {
        let mut account = UserAccount::new("a@b.com", 30);
        account.doc_id = Some("abc".to_string());

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json, serde_json::json!({ "email": "a@b.com", "points": 30 }));
    }
}
