// Analysis result types
//
// The wire shape returned to the UI and expected from the model. Every field
// is required when deserializing; a missing or mistyped field is an invalid
// shape, not a default.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered risk classification (low < moderate < high < urgent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Urgent,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Urgent => "urgent",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcernSeverity {
    Mild,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Immediate,
    ShortTerm,
    Ongoing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainConcern {
    pub area: String,
    pub description: String,
    pub severity: ConcernSeverity,
}

/// A suggested reading topic
///
/// Models return either bare titles or `{title, url}` objects; both are
/// accepted and always emitted as objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ReadingWire")]
pub struct Reading {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Reading {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReadingWire {
    Title(String),
    Full {
        title: String,
        #[serde(default)]
        url: Option<String>,
    },
}

impl From<ReadingWire> for Reading {
    fn from(wire: ReadingWire) -> Self {
        match wire {
            ReadingWire::Title(title) => Reading { title, url: None },
            ReadingWire::Full { title, url } => Reading { title, url },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychoEducation {
    pub title: String,
    pub content: String,
    pub suggested_reading: Vec<Reading>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub action: String,
}

/// Help-line block shown above the report when `show` is set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisResources {
    pub show: bool,
    pub message: String,
}

/// Generated report for one questionnaire submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub risk_level: RiskLevel,
    pub urgent_help: bool,
    pub summary: String,
    pub main_concerns: Vec<MainConcern>,
    pub positive_aspects: Vec<String>,
    pub suggested_topics: Vec<String>,
    pub psycho_education: PsychoEducation,
    pub recommendations: Vec<Recommendation>,
    pub crisis_resources: CrisisResources,
}

impl AnalysisResult {
    /// True when the crisis invariants hold: urgent implies urgent help,
    /// urgent help implies visible crisis resources
    pub fn is_consistent(&self) -> bool {
        (self.risk_level != RiskLevel::Urgent || self.urgent_help)
            && (!self.urgent_help || self.crisis_resources.show)
    }
}
