//! Filesystem resolver — inline file and directory contents.
//!
//! A regular file resolves to its full contents. A directory resolves to
//! the concatenation of its entries: regular files are read in place, and
//! subdirectories are descended into while the depth budget allows. Every
//! file read below the top-level argument is introduced by a provenance
//! header carrying its path relative to that argument.
//!
//! Any read failure is fatal to the whole expansion: nothing is retried,
//! skipped, or salvaged.

use crate::format::provenance;
use futures::future::BoxFuture;
use futures::FutureExt;
use promptloom_core::error::ExpandError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve one filesystem reference to its inlined content.
///
/// `max_depth` is the depth budget: 1 resolves the named resource only,
/// 2 additionally descends one level into subdirectories, and so on.
pub async fn resolve(path: &Path, max_depth: u32) -> Result<String, ExpandError> {
    debug!(path = %path.display(), max_depth, "resolving filesystem reference");

    let meta = tokio::fs::metadata(path)
        .await
        .map_err(|e| map_read_error(path, e))?;

    if meta.is_dir() {
        read_dir_contents(path.to_path_buf(), path.to_path_buf(), max_depth).await
    } else {
        read_file(path).await
    }
}

/// Read a regular file, mapping a vanished file to `ResourceNotFound`.
async fn read_file(path: &Path) -> Result<String, ExpandError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| map_read_error(path, e))
}

fn map_read_error(path: &Path, err: std::io::Error) -> ExpandError {
    let path = path.display().to_string();
    if err.kind() == std::io::ErrorKind::NotFound {
        ExpandError::ResourceNotFound { path }
    } else {
        ExpandError::Io {
            path,
            reason: err.to_string(),
        }
    }
}

/// Concatenate a directory's entries, recursing while `remaining > 1`.
///
/// Entries are visited in name order so output is stable across hosts.
/// Entries beyond the depth budget are silently skipped. `base` is the
/// original top-level argument; headers are relative to it.
fn read_dir_contents(
    dir: PathBuf,
    base: PathBuf,
    remaining: u32,
) -> BoxFuture<'static, Result<String, ExpandError>> {
    async move {
        let mut entries = Vec::new();
        let mut reader = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| map_read_error(&dir, e))?;
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| map_read_error(&dir, e))?
        {
            entries.push(entry.path());
        }
        entries.sort();

        let mut out = String::new();
        for path in entries {
            let meta = tokio::fs::metadata(&path)
                .await
                .map_err(|e| map_read_error(&path, e))?;

            if meta.is_file() {
                let content = read_file(&path).await?;
                let rel = path
                    .strip_prefix(&base)
                    .unwrap_or(&path)
                    .display()
                    .to_string();
                out.push_str(&provenance(content.trim(), &rel, false));
                out.push('\n');
            } else if meta.is_dir() && remaining > 1 {
                out.push_str(
                    &read_dir_contents(path, base.clone(), remaining - 1).await?,
                );
            }
        }
        Ok(out)
    }
    .boxed()
}
