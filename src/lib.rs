// Mindcheck - Mental health screening questionnaire analysis
// Library exports

pub mod analysis; // Analyzer, safety override, fallback reports
pub mod config;
pub mod crisis; // Crisis keyword detection
pub mod errors;
pub mod prompts;
pub mod providers; // External model client
pub mod questionnaire; // Submission types and validation
pub mod server; // HTTP server
