//! # Promptloom Core
//!
//! Domain types, traits, and error definitions for the promptloom prompt
//! expander. This crate has **zero framework dependencies** — it defines
//! the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The inference backend is defined as a trait here; implementations live
//! in `promptloom-providers`. This enables:
//! - Swapping backends via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ExpandError, ProviderError, Result};
pub use provider::{CompletionRequest, CompletionResponse, Provider, Usage};
