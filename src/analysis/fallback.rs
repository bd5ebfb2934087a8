// Fallback report
//
// Static, well-formed results used when the external model is unreachable or
// returns something unusable. Total over language x urgency.

use super::safety::crisis_message;
use super::types::{
    AnalysisResult, CrisisResources, Priority, PsychoEducation, Reading, Recommendation, RiskLevel,
};
use crate::questionnaire::Language;

struct FallbackText {
    summary_urgent: &'static str,
    summary: &'static str,
    positive_aspect: &'static str,
    topics: [&'static str; 2],
    education_title: &'static str,
    education_content: &'static str,
    readings: [&'static str; 2],
    seek_professional: &'static str,
    immediate_urgent: &'static str,
    immediate: &'static str,
}

const FALLBACK_PT: FallbackText = FallbackText {
    summary_urgent: "Não foi possível processar sua avaliação, mas identificamos sinais importantes. Por favor, busque ajuda profissional.",
    summary: "Não foi possível processar sua avaliação completamente. Recomendamos buscar orientação profissional.",
    positive_aspect: "Você deu um passo importante ao buscar autoconhecimento",
    topics: ["Saúde Mental", "Bem-estar emocional"],
    education_title: "Busque Apoio Profissional",
    education_content: "Profissionais de saúde mental podem oferecer avaliação e suporte adequados às suas necessidades.",
    readings: ["Como encontrar um psicólogo", "Serviços de saúde mental no SUS"],
    seek_professional: "Procure um psicólogo ou psiquiatra para uma avaliação profissional",
    immediate_urgent: "Ligue para o CVV: 188 (24h, gratuito)",
    immediate: "Converse com alguém de confiança sobre como você está se sentindo",
};

const FALLBACK_EN: FallbackText = FallbackText {
    summary_urgent: "We could not fully process your assessment, but we identified important signs. Please seek professional help.",
    summary: "We could not fully process your assessment. We recommend seeking professional guidance.",
    positive_aspect: "You took an important step by seeking self-knowledge",
    topics: ["Mental Health", "Emotional well-being"],
    education_title: "Seek Professional Support",
    education_content: "Mental health professionals can provide proper assessment and support tailored to your needs.",
    readings: ["How to find a therapist", "Mental health services and resources"],
    seek_professional: "Seek a psychologist or psychiatrist for a professional assessment",
    immediate_urgent: "Call 988 Suicide & Crisis Lifeline (24/7, free)",
    immediate: "Talk to someone you trust about how you are feeling",
};

/// Build the fallback report for a language and urgency
///
/// Urgent reports are risk `urgent` with crisis resources shown; otherwise
/// risk is `moderate` with resources hidden.
pub fn fallback(language: Language, urgent: bool) -> AnalysisResult {
    let text = match language {
        Language::Pt => &FALLBACK_PT,
        Language::En => &FALLBACK_EN,
    };

    AnalysisResult {
        risk_level: if urgent {
            RiskLevel::Urgent
        } else {
            RiskLevel::Moderate
        },
        urgent_help: urgent,
        summary: if urgent {
            text.summary_urgent
        } else {
            text.summary
        }
        .to_string(),
        main_concerns: Vec::new(),
        positive_aspects: vec![text.positive_aspect.to_string()],
        suggested_topics: text.topics.iter().map(|t| t.to_string()).collect(),
        psycho_education: PsychoEducation {
            title: text.education_title.to_string(),
            content: text.education_content.to_string(),
            suggested_reading: text.readings.iter().map(|r| Reading::titled(*r)).collect(),
        },
        recommendations: vec![
            Recommendation {
                priority: Priority::ShortTerm,
                action: text.seek_professional.to_string(),
            },
            Recommendation {
                priority: Priority::Immediate,
                action: if urgent {
                    text.immediate_urgent
                } else {
                    text.immediate
                }
                .to_string(),
            },
        ],
        crisis_resources: CrisisResources {
            show: urgent,
            message: if urgent {
                crisis_message(language).to_string()
            } else {
                String::new()
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_case_is_complete_and_consistent() {
        for language in Language::ALL {
            for urgent in [true, false] {
                let result = fallback(*language, urgent);

                assert!(result.is_consistent());
                assert_eq!(result.urgent_help, urgent);
                assert_eq!(result.crisis_resources.show, urgent);
                assert!(!result.summary.is_empty());
                assert_eq!(result.positive_aspects.len(), 1);
                assert_eq!(result.suggested_topics.len(), 2);
                assert_eq!(result.psycho_education.suggested_reading.len(), 2);
                assert_eq!(result.recommendations.len(), 2);
            }
        }
    }

    #[test]
    fn test_urgent_english_snapshot() {
        let value = serde_json::to_value(fallback(Language::En, true)).unwrap();

        assert_eq!(value["riskLevel"], "urgent");
        assert_eq!(value["urgentHelp"], true);
        assert_eq!(value["mainConcerns"], json!([]));
        assert_eq!(
            value["recommendations"][1],
            json!({"priority": "immediate", "action": "Call 988 Suicide & Crisis Lifeline (24/7, free)"})
        );
        assert_eq!(
            value["psychoEducation"]["suggestedReading"][0],
            json!({"title": "How to find a therapist"})
        );
        assert!(value["crisisResources"]["message"]
            .as_str()
            .unwrap()
            .contains("988"));
    }

    #[test]
    fn test_urgent_portuguese_snapshot() {
        let result = fallback(Language::Pt, true);

        assert_eq!(result.risk_level, RiskLevel::Urgent);
        assert_eq!(result.recommendations[1].action, "Ligue para o CVV: 188 (24h, gratuito)");
        assert!(result.crisis_resources.message.starts_with("📞 CVV: 188"));
        assert!(result.crisis_resources.message.contains("CAPS ou UPA"));
    }

    #[test]
    fn test_moderate_english_snapshot() {
        let result = fallback(Language::En, false);

        assert_eq!(result.risk_level, RiskLevel::Moderate);
        assert_eq!(
            result.summary,
            "We could not fully process your assessment. We recommend seeking professional guidance."
        );
        assert_eq!(result.recommendations[0].priority, Priority::ShortTerm);
        assert_eq!(result.crisis_resources.message, "");
    }

    #[test]
    fn test_moderate_portuguese_snapshot() {
        let result = fallback(Language::Pt, false);

        assert_eq!(result.risk_level, RiskLevel::Moderate);
        assert_eq!(result.psycho_education.title, "Busque Apoio Profissional");
        assert_eq!(
            result.recommendations[1].action,
            "Converse com alguém de confiança sobre como você está se sentindo"
        );
        assert!(!result.crisis_resources.show);
    }
}
