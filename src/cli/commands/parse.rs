use std::path::Path;

use anyhow::{Context, Result};

use resumex_prompt::{Prompt, ResumeExtractionPrompt, SYSTEM_PROMPT};

use crate::cli::args::ParseArgs;
use crate::config::ResumexConfig;
use crate::llms::{ChatMessage, DEFAULT_BASE_URL, LLM, OpenAI};
use crate::output::write_extraction;

/// Read one resume, run one extraction request, write the raw answer.
///
/// The response is never parsed or validated as JSON: whatever the endpoint
/// returns is trimmed and written verbatim.
pub async fn run_parse_command(
    args: &ParseArgs,
    input: &Path,
    output: &Path,
    token: String,
) -> Result<()> {
    let env_vars: std::collections::HashMap<String, String> = std::env::vars().collect();
    let config = ResumexConfig::load_with_precedence(args.config.clone(), args, &env_vars)?;

    let resume_text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read resume {}", input.display()))?;

    if config.extraction.verbosity > 0 {
        println!(
            "📄 Parsing resume: {} ({} bytes)",
            input.display(),
            resume_text.len()
        );
    }

    let prompt = ResumeExtractionPrompt::new(resume_text).render();
    if config.extraction.debug {
        log::debug!("rendered extraction prompt:\n{prompt}");
    }

    let base_url = config
        .api
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    if config.extraction.verbosity > 1 {
        println!("🔎 Using model {} via {}", config.extraction.model, base_url);
    }

    let client: Box<dyn LLM> = Box::new(
        OpenAI::new(
            config.extraction.model.clone(),
            base_url,
            token,
            SYSTEM_PROMPT.to_string(),
        )
        .with_sampling(config.extraction.temperature, config.extraction.max_tokens),
    );

    let messages = vec![ChatMessage {
        role: "user".to_string(),
        content: prompt,
    }];

    let content = client
        .chat(&messages)
        .await
        .context("completion request failed")?;

    write_extraction(output, content.trim())?;

    println!("✅ Parsed resume saved to {}", output.display());

    Ok(())
}
