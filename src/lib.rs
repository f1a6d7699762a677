pub mod cli;
pub mod config;
pub mod llms;
pub mod output;

// Re-export the prompt types for convenience
pub use resumex_prompt::{Prompt, ResumeExtractionPrompt, SYSTEM_PROMPT};
