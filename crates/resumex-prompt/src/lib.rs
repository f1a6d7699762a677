//! Declarative prompt builder for resumex resume extraction.
//!
//! This crate provides the fixed instructional text sent to the completion
//! endpoint together with a resume, and the type that renders it.
//!
//! # Example
//!
//! ```rust
//! use resumex_prompt::{Prompt, ResumeExtractionPrompt};
//!
//! let prompt = ResumeExtractionPrompt::new("Jane Doe\njane@example.com");
//! let rendered = prompt.render();
//! assert!(rendered.contains("Jane Doe"));
//! ```

mod extraction;
mod templates;
mod traits;

pub use extraction::{ResumeExtractionPrompt, SYSTEM_PROMPT};
pub use traits::Prompt;
