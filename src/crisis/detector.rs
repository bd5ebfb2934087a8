// Crisis keyword detector

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::questionnaire::Language;

/// Built-in Portuguese phrases indicating self-harm risk
pub const CRISIS_KEYWORDS_PT: &[&str] = &[
    "suicídio",
    "suicidio",
    "me matar",
    "matar-me",
    "não quero mais viver",
    "acabar com tudo",
    "morrer",
    "desistir da vida",
    "sem sentido viver",
    "não vale a pena",
    "melhor sem mim",
    "quero desaparecer",
];

/// Built-in English phrases indicating self-harm risk
pub const CRISIS_KEYWORDS_EN: &[&str] = &[
    "suicide",
    "kill myself",
    "don't want to live",
    "end it all",
    "want to die",
    "give up on life",
    "no point living",
    "not worth living",
    "better off without me",
    "want to disappear",
];

/// Additional keywords per language, as stored in a keyword file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrisisKeywords {
    #[serde(default)]
    pub pt: Vec<String>,
    #[serde(default)]
    pub en: Vec<String>,
}

/// Case-insensitive substring matcher over per-language keyword lists
///
/// Matching has no word boundaries: "morrer" also fires inside longer words.
/// Over-triggering is accepted; a missed crisis is not.
#[derive(Debug, Clone)]
pub struct CrisisDetector {
    pt: Vec<String>,
    en: Vec<String>,
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self {
            pt: CRISIS_KEYWORDS_PT.iter().map(|k| k.to_string()).collect(),
            en: CRISIS_KEYWORDS_EN.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl CrisisDetector {
    /// Built-in lists extended with the given keywords
    pub fn with_extra(extra: CrisisKeywords) -> Self {
        let mut detector = Self::default();
        detector.extend(Language::Pt, extra.pt);
        detector.extend(Language::En, extra.en);
        detector
    }

    /// Load additional crisis keywords from a JSON file
    ///
    /// Built-in keywords are always kept; the file can only add to them.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read crisis keywords file: {}", path.display()))?;

        let keywords: CrisisKeywords = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse crisis keywords file: {}", path.display()))?;

        tracing::info!(
            pt = keywords.pt.len(),
            en = keywords.en.len(),
            "Loaded extra crisis keywords"
        );

        Ok(Self::with_extra(keywords))
    }

    fn extend(&mut self, language: Language, keywords: Vec<String>) {
        let list = self.list_mut(language);
        for keyword in keywords {
            let keyword = keyword.trim().to_lowercase();
            if !keyword.is_empty() && !list.contains(&keyword) {
                list.push(keyword);
            }
        }
    }

    fn list_mut(&mut self, language: Language) -> &mut Vec<String> {
        match language {
            Language::Pt => &mut self.pt,
            Language::En => &mut self.en,
        }
    }

    /// Keywords used for the given language
    pub fn keywords(&self, language: Language) -> &[String] {
        match language {
            Language::Pt => &self.pt,
            Language::En => &self.en,
        }
    }

    /// Detect if text contains a crisis keyword of the given language
    pub fn detect_crisis(&self, text: &str, language: Language) -> bool {
        if text.is_empty() {
            return false;
        }

        let text_lower = text.to_lowercase();

        match self
            .keywords(language)
            .iter()
            .find(|keyword| text_lower.contains(keyword.as_str()))
        {
            Some(keyword) => {
                tracing::warn!(language = %language, keyword = %keyword, "Crisis keyword detected");
                true
            }
            None => false,
        }
    }
}
