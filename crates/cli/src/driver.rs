//! The one-shot run: load config, expand the template, record the prompt,
//! request inference, record the answer.
//!
//! This is the only layer that prints a friendly message and exits
//! instead of propagating a raw error; everything below it fails fast.

use promptloom_config::AppConfig;
use promptloom_core::provider::{CompletionRequest, Provider};
use promptloom_expand::{expand, ExpandOptions};
use promptloom_providers::AnthropicProvider;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

pub async fn run(cli: crate::Cli) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // CLI flags override config and environment
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(temperature) = cli.temperature {
        config.temperature = temperature;
    }
    if let Some(depth) = cli.file_depth {
        config.expand.file_depth = depth;
    }
    if let Some(depth) = cli.web_depth {
        config.expand.web_depth = depth;
    }
    if cli.clean {
        config.expand.clean = true;
    }
    if let Some(key) = cli.api_key {
        config.api_key = Some(key);
    }
    config.validate()?;

    // Check for API key early — give a clear error before any work
    let Some(api_key) = config.api_key.clone() else {
        eprintln!();
        eprintln!("  ERROR: No Anthropic API key configured!");
        eprintln!();
        eprintln!("  Set the environment variable (a .env file works too):");
        eprintln!("    ANTHROPIC_API_KEY=sk-ant-...");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!(
            "    {}",
            AppConfig::config_dir().join("config.toml").display()
        );
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    };

    let template = std::fs::read_to_string(&cli.input)
        .map_err(|e| format!("Failed to read input file {}: {e}", cli.input.display()))?
        .trim()
        .to_string();

    // Missing system prompt file is fine; it defaults to empty
    let system = if cli.system.is_file() {
        std::fs::read_to_string(&cli.system)?.trim().to_string()
    } else {
        String::new()
    };

    let opts = ExpandOptions {
        file_allow: to_allow_set(cli.files),
        url_allow: to_allow_set(cli.urls),
        file_depth: config.expand.file_depth,
        web_depth: config.expand.web_depth,
        clean: config.expand.clean,
        deadline: None,
    };

    // A failed expansion aborts here: neither artifact is written
    let prompt = expand(&template, &opts).await?;

    // First record what was prompted
    let prompt_file = prompt_path(&cli.input);
    std::fs::write(&prompt_file, &prompt)?;
    info!(path = %prompt_file.display(), bytes = prompt.len(), "Prompt recorded");

    // Then request inference
    let provider = match cli.base_url {
        Some(base) => AnthropicProvider::new(api_key).with_base_url(base),
        None => AnthropicProvider::new(api_key),
    };
    let response = provider
        .complete(CompletionRequest {
            model: config.model,
            prompt,
            system,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
        .await?;

    // Then finally record the answer
    let answer_file = answer_path(&cli.input, cli.output.as_deref());
    std::fs::write(&answer_file, &response.text)?;

    println!("Answer saved to {}", answer_file.display());
    Ok(())
}

/// An empty flag list means "no filter", not "expand nothing".
fn to_allow_set(values: Vec<String>) -> Option<HashSet<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.into_iter().collect())
    }
}

/// Where the assembled prompt is recorded: the input's name with a
/// `_prompt.txt` suffix, next to the input.
fn prompt_path(input: &Path) -> PathBuf {
    sibling_with_suffix(input, "_prompt.txt")
}

/// Where the answer is recorded: the explicit output path (resolved
/// against the working directory), or the input's name with an
/// `_answer.txt` suffix.
fn answer_path(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => std::env::current_dir().unwrap_or_default().join(path),
        None => sibling_with_suffix(input, "_answer.txt"),
    }
}

fn sibling_with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{suffix}"))
}
