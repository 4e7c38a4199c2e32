//! promptloom — expand file and web references in a prompt template and
//! submit the result to an Anthropic model.
//!
//! The binary entry point lives in `main.rs`; the argument surface and
//! the one-shot driver live here so the full run can be exercised from
//! integration tests.

use clap::Parser;
use std::path::PathBuf;

pub mod driver;

#[derive(Parser)]
#[command(
    name = "promptloom",
    about = "Expand file and web references in a prompt template and send it to an Anthropic model",
    version,
    author
)]
pub struct Cli {
    /// Input template file. File paths and http/https URLs found in it are
    /// recursively inlined before submission.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file for the model's answer. Defaults to the input's name
    /// with an `_answer.txt` suffix.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// System prompt file, looked up relative to the working directory.
    #[arg(long, default_value = "system.txt")]
    pub system: PathBuf,

    /// Model to use (overrides config and CLAUDE_MODEL).
    #[arg(long)]
    pub model: Option<String>,

    /// Amount of randomness injected into the response, 0.0 to 1.0.
    #[arg(short = 't', long)]
    pub temperature: Option<f32>,

    /// Recursion depth for file/directory references.
    #[arg(long)]
    pub file_depth: Option<u32>,

    /// Recursion depth when following child links of web references.
    /// Keep this low: every level multiplies the token count.
    #[arg(long)]
    pub web_depth: Option<u32>,

    /// Expand only these file paths; other existing paths stay literal.
    #[arg(long = "file", value_name = "PATH")]
    pub files: Vec<String>,

    /// Expand only these URLs; other URLs stay literal.
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// Run the lossy cleaning pass on the assembled prompt.
    #[arg(long)]
    pub clean: bool,

    /// Anthropic API key (a .env file works too).
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the Anthropic API base URL (testing or proxies).
    #[arg(long, hide = true)]
    pub base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
