//! Reference expansion engine — the core of promptloom.
//!
//! Takes a flat prompt template, finds embedded references to external
//! resources (local files/directories and web pages), and recursively
//! inlines their content in place:
//!
//! 1. **Splitter** tokenizes the template into whitespace and
//!    non-whitespace runs, order-preserving.
//! 2. **Classifier** tags each token as a URL, a filesystem path, or
//!    literal text.
//! 3. **Resolvers** (filesystem, web) inline the referenced content,
//!    recursing up to a per-kind depth budget.
//! 4. **Formatter** prefixes inlined content below the top level with a
//!    provenance header naming its origin.
//! 5. **Cleaner** (optional) shrinks the assembled prompt before
//!    submission to the model.
//!
//! The walk is sequential and fail-fast: the first resolver error anywhere
//! in the recursion aborts the whole expansion. There is no deduplication,
//! no caching across runs, and no cycle detection — the depth budget is
//! the only termination guarantee.

pub mod classify;
pub mod cleaner;
pub mod format;
pub mod fs_resolver;
pub mod orchestrator;
pub mod splitter;
pub mod web_resolver;

// Re-export key types at crate root for ergonomics
pub use classify::{classify, ReferenceKind};
pub use cleaner::clean;
pub use orchestrator::{expand, ExpandOptions};
pub use splitter::{split, Token};
