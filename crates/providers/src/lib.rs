//! LLM provider implementations.
//!
//! Currently Anthropic's Messages API only; the `Provider` trait in
//! `promptloom-core` is the seam for adding others.

pub mod anthropic;

pub use anthropic::AnthropicProvider;
