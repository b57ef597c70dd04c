// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitness questionnaire submitted by the client.
//!
//! The questionnaire is loosely structured: nothing is required and unknown
//! keys are kept. It is stored exactly as received.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Rendered in place of any answer the user did not give.
pub const NOT_SPECIFIED: &str = "Not specified";

/// A questionnaire answer that feeds the prompt.
#[derive(Debug, Clone, Copy)]
pub struct ProfileField {
    /// Label shown to the model
    pub label: &'static str,
    /// Key path into the questionnaire JSON
    pub path: &'static [&'static str],
    /// Unit appended after the value (also after the placeholder)
    pub unit: Option<&'static str>,
}

const fn field(
    label: &'static str,
    path: &'static [&'static str],
    unit: Option<&'static str>,
) -> ProfileField {
    ProfileField { label, path, unit }
}

/// Answers used in the plan prompt, in prompt order.
pub const PROFILE_FIELDS: &[ProfileField] = &[
    field("Age", &["basicInfo", "ageRange"], None),
    field("Gender", &["basicInfo", "gender"], None),
    field("Height", &["basicInfo", "height"], Some("cm")),
    field("Weight", &["basicInfo", "weight"], Some("kg")),
    field("Goal", &["fitnessGoal"], None),
    field("Experience", &["experienceLevel"], None),
    field("Activity Level", &["activityLevel"], None),
    field("Training Days", &["timeAvailability", "trainingDays"], None),
    field("Workout Duration", &["timeAvailability", "workoutDuration"], None),
    field("Equipment", &["equipmentAccess"], None),
    field("Diet", &["dietaryPreference"], None),
    field("Injuries", &["healthConsiderations", "hasInjuries"], None),
    field("Environment", &["supplementary", "workoutEnvironment"], None),
    field("Sleep", &["supplementary", "sleepHours"], None),
];

/// Questionnaire as submitted. Always a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Map<String, Value>);

impl UserProfile {
    /// Accept a request body, which must be a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Look up an answer by key path.
    ///
    /// Returns `None` if any step is missing, an intermediate value is not
    /// an object, or the answer is `null`.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.0.get(*first)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        (!current.is_null()).then_some(current)
    }

    /// Render an answer for the prompt, falling back to [`NOT_SPECIFIED`].
    pub fn display(&self, path: &[&str]) -> String {
        match self.get(path) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => NOT_SPECIFIED.to_string(),
        }
    }
}
