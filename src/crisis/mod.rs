// Crisis detection module
// Language-specific keyword matching over the free-text answer

mod detector;

pub use detector::{CrisisDetector, CrisisKeywords, CRISIS_KEYWORDS_EN, CRISIS_KEYWORDS_PT};
