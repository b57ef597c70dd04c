// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FlexAI: AI-generated fitness plans and challenge points
//!
//! This crate provides the backend API that turns a fitness questionnaire
//! into a training and meal plan via a chat-completion service, stores the
//! plans, and keeps a per-user points counter for completed challenges.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FitnessStore;
use services::CompletionService;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn FitnessStore>,
    pub completion: Arc<dyn CompletionService>,
}
