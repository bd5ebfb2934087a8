// Analysis module
// Result shape, model output parsing, safety override, fallback report and
// the orchestrator shared by every handler

mod analyzer;
mod fallback;
mod parse;
mod safety;
mod types;

pub use analyzer::{AnalysisOutcome, AnalysisSource, Analyzer};
pub use fallback::fallback;
pub use parse::{parse_analysis, strip_code_fences, AnalysisError};
pub use safety::{
    apply_override, classify, crisis_message, SafetyOverride, CRISIS_MESSAGE_EN,
    CRISIS_MESSAGE_PT,
};
pub use types::{
    AnalysisResult, ConcernSeverity, CrisisResources, MainConcern, Priority, PsychoEducation,
    Reading, Recommendation, RiskLevel,
};
