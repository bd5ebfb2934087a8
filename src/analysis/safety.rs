// Safety override
//
// Local rules that guarantee crisis handling regardless of what the external
// model returned. The override only ever upgrades a result to urgent.

use once_cell::sync::Lazy;

use super::types::{AnalysisResult, RiskLevel};
use crate::crisis::CrisisDetector;
use crate::questionnaire::{Language, QuestionnaireInput};

/// Portuguese crisis resources shown when urgency is forced
pub const CRISIS_MESSAGE_PT: &str = "📞 CVV: 188 (24h, gratuito)\n📱 Chat: cvv.org.br\n🏥 CAPS ou UPA mais próximos\n\nVocê importa. Sua vida tem valor.";

/// English crisis resources shown when urgency is forced
pub const CRISIS_MESSAGE_EN: &str = "📞 988 Suicide & Crisis Lifeline (24/7)\n📱 Text HOME to 741741\n🏥 Nearest emergency room\n\nYou matter. Your life has value.";

static DEFAULT_OVERRIDE: Lazy<SafetyOverride> = Lazy::new(SafetyOverride::default);

/// Crisis resource text, selected only by the submission language
pub fn crisis_message(language: Language) -> &'static str {
    match language {
        Language::Pt => CRISIS_MESSAGE_PT,
        Language::En => CRISIS_MESSAGE_EN,
    }
}

/// Classify a candidate with the built-in crisis keyword lists
///
/// Shared entry point for every handler: the candidate may come from the
/// model or from the fallback generator.
pub fn classify(input: &QuestionnaireInput, candidate: AnalysisResult) -> AnalysisResult {
    DEFAULT_OVERRIDE.classify(input, candidate)
}

/// Safety override bound to a crisis detector
#[derive(Debug, Clone, Default)]
pub struct SafetyOverride {
    detector: CrisisDetector,
}

impl SafetyOverride {
    pub fn new(detector: CrisisDetector) -> Self {
        Self { detector }
    }

    /// Whether local rules mandate an urgent classification
    pub fn force_urgent(&self, input: &QuestionnaireInput) -> bool {
        input.is_very_dark()
            || self
                .detector
                .detect_crisis(&input.open_response, input.language)
    }

    /// Apply the override to a candidate result
    pub fn classify(&self, input: &QuestionnaireInput, candidate: AnalysisResult) -> AnalysisResult {
        let force_urgent = self.force_urgent(input);
        apply_override(candidate, input.language, force_urgent)
    }
}

/// Apply the override given a precomputed forced-urgent decision
///
/// When forced: risk becomes urgent, urgent help is set and crisis resources
/// are shown (with the language's message if the candidate had them hidden).
/// A non-forced candidate is returned unchanged.
pub fn apply_override(
    mut result: AnalysisResult,
    language: Language,
    force_urgent: bool,
) -> AnalysisResult {
    if !force_urgent {
        return result;
    }

    if result.risk_level != RiskLevel::Urgent || !result.urgent_help {
        tracing::info!(
            from = %result.risk_level,
            language = %language,
            "Safety override forcing urgent classification"
        );
    }
    result.risk_level = RiskLevel::Urgent;
    result.urgent_help = true;

    if !result.crisis_resources.show {
        result.crisis_resources.show = true;
        result.crisis_resources.message = crisis_message(language).to_string();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fallback;
    use crate::analysis::types::{CrisisResources, PsychoEducation};
    use crate::questionnaire::validate;
    use serde_json::json;

    fn input(hopelessness: &str, open_response: &str, language: &str) -> QuestionnaireInput {
        validate(&json!({
            "mood": "neutral",
            "sleep": "good",
            "energy": "normal",
            "concentration": "good",
            "socialInteraction": "normal",
            "appetite": "normal",
            "hopelessness": hopelessness,
            "anxiety": "occasional",
            "physicalSymptoms": "none",
            "dailyActivities": "normal",
            "openResponse": open_response,
            "language": language
        }))
        .unwrap()
    }

    fn candidate(risk_level: RiskLevel) -> AnalysisResult {
        AnalysisResult {
            risk_level,
            urgent_help: false,
            summary: "Stable overall.".to_string(),
            main_concerns: vec![],
            positive_aspects: vec!["Good sleep".to_string()],
            suggested_topics: vec![],
            psycho_education: PsychoEducation {
                title: "Wellbeing".to_string(),
                content: "Keep going.".to_string(),
                suggested_reading: vec![],
            },
            recommendations: vec![],
            crisis_resources: CrisisResources {
                show: false,
                message: String::new(),
            },
        }
    }

    #[test]
    fn test_very_dark_forces_urgent() {
        let result = classify(&input("very-dark", "", "en"), candidate(RiskLevel::Low));

        assert_eq!(result.risk_level, RiskLevel::Urgent);
        assert!(result.urgent_help);
        assert!(result.crisis_resources.show);
        assert_eq!(result.crisis_resources.message, CRISIS_MESSAGE_EN);
    }

    #[test]
    fn test_keyword_forces_urgent_despite_optimism() {
        let result = classify(
            &input("optimistic", "Às vezes penso em me matar", "pt"),
            candidate(RiskLevel::Low),
        );

        assert_eq!(result.risk_level, RiskLevel::Urgent);
        assert!(result.crisis_resources.message.contains("CVV: 188"));
    }

    #[test]
    fn test_existing_crisis_message_is_kept() {
        let mut with_resources = candidate(RiskLevel::High);
        with_resources.crisis_resources = CrisisResources {
            show: true,
            message: "Call your local line".to_string(),
        };

        let result = classify(&input("very-dark", "", "pt"), with_resources);
        assert_eq!(result.risk_level, RiskLevel::Urgent);
        assert_eq!(result.crisis_resources.message, "Call your local line");
    }

    #[test]
    fn test_non_forced_result_is_untouched() {
        for level in [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High] {
            let original = candidate(level);
            let result = classify(&input("hopeless", "Estou cansado", "pt"), original.clone());
            assert_eq!(result, original);
        }
    }

    #[test]
    fn test_message_follows_input_language_not_content() {
        let mut english_content = candidate(RiskLevel::High);
        english_content.summary = "Please call 988".to_string();

        let result = classify(&input("very-dark", "", "pt"), english_content);
        assert_eq!(result.crisis_resources.message, CRISIS_MESSAGE_PT);
    }

    #[test]
    fn test_non_forced_inconsistent_result_is_untouched() {
        let submission = input("neutral", "", "en");

        let declared_urgent = candidate(RiskLevel::Urgent);
        assert_eq!(classify(&submission, declared_urgent.clone()), declared_urgent);

        let mut help_without_resources = candidate(RiskLevel::High);
        help_without_resources.urgent_help = true;
        let result = classify(&submission, help_without_resources.clone());
        assert_eq!(result, help_without_resources);
        assert!(!result.crisis_resources.show);
        assert!(result.crisis_resources.message.is_empty());
    }

    #[test]
    fn test_override_is_idempotent_on_fallback() {
        let urgent = fallback(Language::En, true);
        assert_eq!(apply_override(urgent.clone(), Language::En, true), urgent);

        let moderate = fallback(Language::Pt, false);
        assert_eq!(apply_override(moderate.clone(), Language::Pt, false), moderate);
    }

    #[test]
    fn test_custom_detector_is_used() {
        let detector = crate::crisis::CrisisDetector::with_extra(crate::crisis::CrisisKeywords {
            pt: vec![],
            en: vec!["can't go on".to_string()],
        });
        let safety = SafetyOverride::new(detector);

        let submission = input("neutral", "I can't go on", "en");
        assert!(safety.force_urgent(&submission));
        assert!(!DEFAULT_OVERRIDE.force_urgent(&submission));
    }
}
