//! Expansion orchestration.
//!
//! Drives tokens through classifier → resolver → formatter and
//! concatenates the pieces — resolved or literal — in original token
//! order. Allow-lists gate which classified references are actually
//! expanded; a reference kept back by a filter is emitted as its literal
//! token text, never dropped.

use crate::classify::{classify, ReferenceKind};
use crate::cleaner;
use crate::fs_resolver;
use crate::splitter::split;
use crate::web_resolver;
use promptloom_core::error::ExpandError;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Options for one expansion run.
#[derive(Debug, Clone)]
pub struct ExpandOptions {
    /// Exact-match allow-list of file paths. `None` or empty = expand all.
    pub file_allow: Option<HashSet<String>>,
    /// Exact-match allow-list of URLs. `None` or empty = expand all.
    pub url_allow: Option<HashSet<String>>,
    /// Depth budget for filesystem references.
    pub file_depth: u32,
    /// Depth budget for web references.
    pub web_depth: u32,
    /// Run the cleaning pass on the assembled result.
    pub clean: bool,
    /// Optional wall-clock budget for the whole expansion. `None` waits
    /// without bound.
    pub deadline: Option<Duration>,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            file_allow: None,
            url_allow: None,
            file_depth: 1,
            web_depth: 1,
            clean: false,
            deadline: None,
        }
    }
}

/// Expand all references in a template and return the assembled prompt.
///
/// Sequential and fail-fast: each token is resolved to completion before
/// the next begins, and the first resolver error aborts the run.
pub async fn expand(template: &str, opts: &ExpandOptions) -> Result<String, ExpandError> {
    match opts.deadline {
        Some(deadline) => tokio::time::timeout(deadline, expand_inner(template, opts))
            .await
            .map_err(|_| ExpandError::Timeout {
                millis: deadline.as_millis() as u64,
            })?,
        None => expand_inner(template, opts).await,
    }
}

async fn expand_inner(template: &str, opts: &ExpandOptions) -> Result<String, ExpandError> {
    let client = reqwest::Client::new();
    let mut out = String::new();

    for token in split(template) {
        match classify(&token) {
            ReferenceKind::Web if allowed(&opts.url_allow, &token.text) => {
                debug!(index = token.index, url = %token.text, "expanding web reference");
                let resolved =
                    web_resolver::resolve(&client, &token.text, opts.web_depth).await?;
                out.push_str(&resolved);
            }
            ReferenceKind::File if allowed(&opts.file_allow, &token.text) => {
                debug!(index = token.index, path = %token.text, "expanding file reference");
                let resolved =
                    fs_resolver::resolve(Path::new(&token.text), opts.file_depth).await?;
                out.push_str(&resolved);
            }
            _ => out.push_str(&token.text),
        }
    }

    if opts.clean {
        Ok(cleaner::clean(&out))
    } else {
        Ok(out)
    }
}

/// An absent or empty allow-list admits everything; a non-empty one
/// admits exact matches only.
fn allowed(list: &Option<HashSet<String>>, reference: &str) -> bool {
    match list {
        None => true,
        Some(set) => set.is_empty() || set.contains(reference),
    }
}
