//! Reference classification.
//!
//! Decides, per token, whether it names an external resource to inline.
//! The URL-prefix check runs before the filesystem existence check, so a
//! string beginning with a URL scheme is never misclassified as a path.

use crate::splitter::Token;
use std::path::Path;

/// What a token refers to. Computed fresh per run, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Plain text, emitted unchanged.
    Literal,
    /// An existing file or directory, relative to the working directory.
    File,
    /// An http/https URL.
    Web,
}

/// Classify a single token.
///
/// Whitespace tokens are always `Literal`. A non-whitespace token is `Web`
/// if it starts with a recognized URL scheme, `File` if it names an
/// existing file or directory, and `Literal` otherwise.
pub fn classify(token: &Token) -> ReferenceKind {
    if token.is_whitespace() {
        return ReferenceKind::Literal;
    }
    if is_url(&token.text) {
        return ReferenceKind::Web;
    }
    if Path::new(&token.text).exists() {
        ReferenceKind::File
    } else {
        ReferenceKind::Literal
    }
}

/// Whether a string begins with a recognized URL scheme prefix.
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
