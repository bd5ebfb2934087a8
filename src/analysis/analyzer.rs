// Analysis orchestration
//
// One provider call per submission, fallback on any failure, safety override
// on every path.

use std::sync::Arc;
use std::time::Instant;

use super::fallback::fallback;
use super::parse::{parse_analysis, AnalysisError};
use super::safety::SafetyOverride;
use super::types::AnalysisResult;
use crate::prompts;
use crate::providers::LlmProvider;
use crate::questionnaire::QuestionnaireInput;

/// Where the candidate result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    Model,
    Fallback,
}

/// Final result plus provenance
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub source: AnalysisSource,
    pub force_urgent: bool,
}

/// Runs submissions through the provider, fallback and safety override
///
/// Holds no per-request state; share it behind an `Arc`.
pub struct Analyzer {
    provider: Arc<dyn LlmProvider>,
    safety: SafetyOverride,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn LlmProvider>, safety: SafetyOverride) -> Self {
        Self { provider, safety }
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    pub fn safety(&self) -> &SafetyOverride {
        &self.safety
    }

    /// Analyze a submission. Never fails: service problems yield the fallback.
    pub async fn analyze(&self, input: &QuestionnaireInput) -> AnalysisResult {
        self.analyze_detailed(input).await.result
    }

    pub async fn analyze_detailed(&self, input: &QuestionnaireInput) -> AnalysisOutcome {
        let force_urgent = self.safety.force_urgent(input);
        let start = Instant::now();

        let (candidate, source) = match self.request_candidate(input).await {
            Ok(candidate) => {
                tracing::info!(
                    provider = %self.provider.name(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    risk_level = %candidate.risk_level,
                    consistent = candidate.is_consistent(),
                    "Model analysis received"
                );
                (candidate, AnalysisSource::Model)
            }
            Err(e) => {
                match &e {
                    AnalysisError::Unavailable(err) => tracing::warn!(
                        kind = e.kind(),
                        timed_out = err.is_timeout(),
                        provider = %self.provider.name(),
                        error = %e,
                        "Analysis service unreachable, using fallback report"
                    ),
                    _ => tracing::warn!(
                        kind = e.kind(),
                        provider = %self.provider.name(),
                        error = %e,
                        "Analysis service returned unusable output, using fallback report"
                    ),
                }
                (fallback(input.language, force_urgent), AnalysisSource::Fallback)
            }
        };

        let result = self.safety.classify(input, candidate);

        AnalysisOutcome {
            result,
            source,
            force_urgent,
        }
    }

    /// Ask the provider for a candidate and validate its shape
    pub async fn request_candidate(
        &self,
        input: &QuestionnaireInput,
    ) -> Result<AnalysisResult, AnalysisError> {
        let request = prompts::build_request(input).map_err(AnalysisError::Prompt)?;

        let text = self.provider.generate(&request).await?;

        parse_analysis(&text).map_err(|e| {
            tracing::debug!(output = %text, "Unusable model output");
            e
        })
    }
}
