// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt text for plan generation.

use crate::models::profile::{UserProfile, PROFILE_FIELDS};
use std::fmt::Write as _;

/// System instruction sent with every plan request.
pub const PLAN_SYSTEM_PROMPT: &str = "You are a professional fitness trainer and nutritionist.";

const PROMPT_HEADER: &str = "Create a fitness plan for someone with these details:";

const PROMPT_FOOTER: &str = "Please provide a detailed fitness plan including:
1. Weekly workout schedule
2. Specific exercises with sets, reps, and rest periods
3. Meal plan with breakfast, lunch, and dinner suggestions
4. Additional tips and recommendations";

/// Build the user prompt for a questionnaire. Never fails; unanswered
/// questions read "Not specified".
pub fn build_plan_prompt(profile: &UserProfile) -> String {
    let mut prompt = String::from(PROMPT_HEADER);
    prompt.push('\n');

    for field in PROFILE_FIELDS {
        let value = profile.display(field.path);
        // Writing to a String cannot fail.
        let _ = match field.unit {
            Some(unit) => writeln!(prompt, "{}: {} {}", field.label, value, unit),
            None => writeln!(prompt, "{}: {}", field.label, value),
        };
    }

    prompt.push('\n');
    prompt.push_str(PROMPT_FOOTER);
    prompt
}
