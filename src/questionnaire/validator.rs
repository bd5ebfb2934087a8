// Input validator
//
// The only validation layer: turns an untrusted JSON payload into a
// QuestionnaireInput or a list of field-level violations.

use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;

use super::types::{QuestionnaireInput, UnknownValue, MAX_OPEN_RESPONSE_CHARS};

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Payload rejected by the validator
#[derive(Debug, Clone, Error)]
#[error("Invalid input data: {}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, message)],
        }
    }

    /// True if any violation concerns the given field
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Collects violations while fields are read
struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl<'a> FieldReader<'a> {
    fn required<T>(&mut self, field: &str) -> Option<T>
    where
        T: FromStr<Err = UnknownValue>,
    {
        match self.object.get(field) {
            None | Some(Value::Null) => {
                self.violations.push(FieldViolation::new(field, "Required"));
                None
            }
            Some(Value::String(s)) => match s.parse::<T>() {
                Ok(value) => Some(value),
                Err(e) => {
                    self.violations.push(FieldViolation::new(field, e.to_string()));
                    None
                }
            },
            Some(other) => {
                self.violations.push(FieldViolation::new(
                    field,
                    format!("Expected string, received {}", json_type(other)),
                ));
                None
            }
        }
    }

    fn optional<T>(&mut self, field: &str) -> Option<T>
    where
        T: FromStr<Err = UnknownValue> + Default,
    {
        match self.object.get(field) {
            None | Some(Value::Null) => Some(T::default()),
            Some(_) => self.required(field),
        }
    }

    fn open_response(&mut self, field: &str) -> Option<String> {
        match self.object.get(field) {
            None | Some(Value::Null) => Some(String::new()),
            Some(Value::String(s)) => {
                if s.chars().count() > MAX_OPEN_RESPONSE_CHARS {
                    self.violations.push(FieldViolation::new(
                        field,
                        format!(
                            "String must contain at most {} character(s)",
                            MAX_OPEN_RESPONSE_CHARS
                        ),
                    ));
                    None
                } else {
                    Some(s.clone())
                }
            }
            Some(other) => {
                self.violations.push(FieldViolation::new(
                    field,
                    format!("Expected string, received {}", json_type(other)),
                ));
                None
            }
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate a submission payload
///
/// Unknown keys are ignored. All violations are reported together.
pub fn validate(payload: &Value) -> Result<QuestionnaireInput, ValidationError> {
    let object = payload.as_object().ok_or_else(|| {
        ValidationError::single(
            "body",
            format!("Expected object, received {}", json_type(payload)),
        )
    })?;

    let mut reader = FieldReader {
        object,
        violations: Vec::new(),
    };

    let mood = reader.required("mood");
    let sleep = reader.required("sleep");
    let energy = reader.required("energy");
    let concentration = reader.required("concentration");
    let social_interaction = reader.required("socialInteraction");
    let appetite = reader.required("appetite");
    let hopelessness = reader.required("hopelessness");
    let anxiety = reader.required("anxiety");
    let physical_symptoms = reader.required("physicalSymptoms");
    let daily_activities = reader.required("dailyActivities");
    let open_response = reader.open_response("openResponse");
    let language = reader.optional("language");

    if !reader.violations.is_empty() {
        return Err(ValidationError {
            violations: reader.violations,
        });
    }

    // Every reader call returned Some when no violation was recorded
    match (
        mood,
        sleep,
        energy,
        concentration,
        social_interaction,
        appetite,
        hopelessness,
        anxiety,
        physical_symptoms,
        daily_activities,
        open_response,
        language,
    ) {
        (
            Some(mood),
            Some(sleep),
            Some(energy),
            Some(concentration),
            Some(social_interaction),
            Some(appetite),
            Some(hopelessness),
            Some(anxiety),
            Some(physical_symptoms),
            Some(daily_activities),
            Some(open_response),
            Some(language),
        ) => Ok(QuestionnaireInput {
            mood,
            sleep,
            energy,
            concentration,
            social_interaction,
            appetite,
            hopelessness,
            anxiety,
            physical_symptoms,
            daily_activities,
            open_response,
            language,
        }),
        _ => Err(ValidationError::single("body", "Incomplete submission")),
    }
}
