// Questionnaire answer types
//
// Every dimension is a closed enumeration of five values ordered from best to
// worst. The wire values are the kebab-case strings the web form submits.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Maximum length of the free-text answer, in characters
pub const MAX_OPEN_RESPONSE_CHARS: usize = 2000;

/// Error returned when a wire value is not part of a dimension's value set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue {
    pub expected: &'static [&'static str],
    pub received: String,
}

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected = self
            .expected
            .iter()
            .map(|v| format!("'{}'", v))
            .collect::<Vec<_>>()
            .join(" | ");
        write!(
            f,
            "Invalid enum value. Expected {}, received '{}'",
            expected, self.received
        )
    }
}

impl std::error::Error for UnknownValue {}

macro_rules! answer_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// All values, best to worst
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire values, best to worst
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Position in the best-to-worst ordering (0 = best, 4 = worst)
            pub fn severity(&self) -> usize {
                Self::ALL
                    .iter()
                    .position(|v| v == self)
                    .unwrap_or_default()
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownValue {
                        expected: Self::VALUES,
                        received: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

answer_enum! {
    /// Mood over the last two weeks
    Mood {
        VeryGood => "very-good",
        Good => "good",
        Neutral => "neutral",
        Bad => "bad",
        VeryBad => "very-bad",
    }
}

answer_enum! {
    /// Sleep quality
    Sleep {
        Excellent => "excellent",
        Good => "good",
        Irregular => "irregular",
        Poor => "poor",
        VeryPoor => "very-poor",
    }
}

answer_enum! {
    /// Energy level during the day
    Energy {
        High => "high",
        Normal => "normal",
        Low => "low",
        VeryLow => "very-low",
        Exhausted => "exhausted",
    }
}

answer_enum! {
    /// Concentration and decision making
    Concentration {
        Excellent => "excellent",
        Good => "good",
        Moderate => "moderate",
        Poor => "poor",
        VeryPoor => "very-poor",
    }
}

answer_enum! {
    /// Attitude towards social contact
    SocialInteraction {
        Enjoy => "enjoy",
        Normal => "normal",
        Reduced => "reduced",
        Avoiding => "avoiding",
        Isolated => "isolated",
    }
}

answer_enum! {
    /// Appetite and eating
    Appetite {
        Normal => "normal",
        SlightChange => "slight-change",
        Increased => "increased",
        Decreased => "decreased",
        VeryChanged => "very-changed",
    }
}

answer_enum! {
    /// Feelings about the future. `VeryDark` always forces an urgent result.
    Hopelessness {
        Optimistic => "optimistic",
        Neutral => "neutral",
        SomeWorry => "some-worry",
        Hopeless => "hopeless",
        VeryDark => "very-dark",
    }
}

answer_enum! {
    /// Anxiety or excessive worry
    Anxiety {
        None => "none",
        Occasional => "occasional",
        Frequent => "frequent",
        Constant => "constant",
        Overwhelming => "overwhelming",
    }
}

answer_enum! {
    /// Physical symptoms without apparent cause
    PhysicalSymptoms {
        None => "none",
        Minimal => "minimal",
        Moderate => "moderate",
        Frequent => "frequent",
        Severe => "severe",
    }
}

answer_enum! {
    /// Ability to carry out daily activities
    DailyActivities {
        Normal => "normal",
        SlightDifficulty => "slight-difficulty",
        ModerateDifficulty => "moderate-difficulty",
        MajorDifficulty => "major-difficulty",
        Unable => "unable",
    }
}

answer_enum! {
    /// Report language. Selects the prompt, keyword list and crisis text.
    Language {
        Pt => "pt",
        En => "en",
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Pt
    }
}

/// A validated questionnaire submission
///
/// Only produced by [`super::validate`]; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireInput {
    pub mood: Mood,
    pub sleep: Sleep,
    pub energy: Energy,
    pub concentration: Concentration,
    pub social_interaction: SocialInteraction,
    pub appetite: Appetite,
    pub hopelessness: Hopelessness,
    pub anxiety: Anxiety,
    pub physical_symptoms: PhysicalSymptoms,
    pub daily_activities: DailyActivities,
    pub open_response: String,
    pub language: Language,
}

impl QuestionnaireInput {
    /// True when the hopelessness answer is the hard crisis trigger
    pub fn is_very_dark(&self) -> bool {
        self.hopelessness == Hopelessness::VeryDark
    }

    pub fn has_open_response(&self) -> bool {
        !self.open_response.trim().is_empty()
    }
}
