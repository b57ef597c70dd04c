// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod completion;
pub mod plan;
pub mod prompt;

pub use completion::{
    check_api_key, ApiKeyStatus, CompletionRequest, CompletionService, OpenAiClient,
};
pub use plan::generate_plan;
