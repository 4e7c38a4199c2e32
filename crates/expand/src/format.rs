//! Provenance formatting for inlined content.
//!
//! Both resolvers use the same convention: content inlined below the
//! top-level resource is introduced by a blank line, its origin (path or
//! URL), a colon, and a blank line. The top-level resource itself carries
//! no header.

/// Wrap resolved content with its provenance header.
///
/// Pure function: identity when `top_level` is true.
pub fn provenance(content: &str, origin: &str, top_level: bool) -> String {
    if top_level {
        content.to_string()
    } else {
        format!("\n\n{origin}:\n\n{content}")
    }
}
