// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod account;
pub mod plan;
pub mod profile;

pub use account::UserAccount;
pub use plan::PlanRecord;
pub use profile::UserProfile;
