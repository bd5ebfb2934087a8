// Questionnaire module
// Answer types and the input validator

mod types;
mod validator;

pub use types::{
    Anxiety, Appetite, Concentration, DailyActivities, Energy, Hopelessness, Language, Mood,
    PhysicalSymptoms, QuestionnaireInput, SocialInteraction, Sleep, UnknownValue,
    MAX_OPEN_RESPONSE_CHARS,
};
pub use validator::{validate, FieldViolation, ValidationError};
