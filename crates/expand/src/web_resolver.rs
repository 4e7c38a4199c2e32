//! Web resolver — fetch pages and inline their visible text.
//!
//! Fetches the referenced page, strips all markup, and — while the depth
//! budget allows — follows outbound hyperlinks: absolute targets on the
//! same origin and relative targets rebuilt against the origin host. Each
//! child page is introduced by a provenance header carrying its resolved
//! absolute URL.
//!
//! There is no deduplication or cycle detection; a page linking back to an
//! ancestor is refetched until the depth budget runs out. Any fetch
//! failure anywhere in the recursion is fatal to the whole expansion.

use crate::format::provenance;
use futures::future::BoxFuture;
use futures::FutureExt;
use promptloom_core::error::ExpandError;
use scraper::{Html, Selector};
use tracing::debug;

/// Resolve one web reference to its inlined content.
///
/// `max_depth` is the depth budget: 1 fetches the named page only, 2
/// additionally follows its immediate links, and so on.
pub async fn resolve(
    client: &reqwest::Client,
    url: &str,
    max_depth: u32,
) -> Result<String, ExpandError> {
    resolve_recursive(client.clone(), url.to_string(), max_depth).await
}

fn resolve_recursive(
    client: reqwest::Client,
    url: String,
    remaining: u32,
) -> BoxFuture<'static, Result<String, ExpandError>> {
    async move {
        debug!(%url, remaining, "fetching web reference");
        let body = fetch(&client, &url).await?;

        let mut text = extract_visible_text(&body);

        if remaining > 1 {
            let host = origin_host(&url);
            let scheme = scheme_of(&url);

            for href in extract_hyperlink_targets(&body) {
                if href.is_empty() {
                    continue;
                }
                if crate::classify::is_url(&href) {
                    if is_same_origin(&href, &host) {
                        let child =
                            resolve_recursive(client.clone(), href.clone(), remaining - 1)
                                .await?;
                        text.push_str(&provenance(&child, &href, false));
                    }
                } else if href != "/" {
                    let absolute = format!("{scheme}://{host}{href}");
                    let child =
                        resolve_recursive(client.clone(), absolute.clone(), remaining - 1)
                            .await?;
                    text.push_str(&provenance(&child, &absolute, false));
                }
            }
        }

        Ok(text)
    }
    .boxed()
}

/// GET a page body. Transport failures and non-success statuses are both
/// fatal; nothing is retried.
async fn fetch(client: &reqwest::Client, url: &str) -> Result<String, ExpandError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ExpandError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExpandError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| ExpandError::Network {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Extract the text content of a page, all markup stripped.
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document.root_element().text().collect()
}

/// Extract `<a href>` targets in document order. Empty targets are kept
/// out by the caller's filter, not here.
pub fn extract_hyperlink_targets(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a").expect("static selector");
    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// The origin host of a URL: everything after the last `//` up to the
/// next `/`.
pub fn origin_host(url: &str) -> String {
    let tail = url.split("//").last().unwrap_or(url);
    tail.split('/').next().unwrap_or(tail).to_string()
}

/// The scheme to use when rebuilding relative targets.
fn scheme_of(url: &str) -> &str {
    if url.starts_with("https://") { "https" } else { "http" }
}

/// Crude same-origin check: the origin host appearing anywhere in the
/// target counts as same-origin. Known-weak (an unrelated host containing
/// the origin host as a substring passes); kept isolated here so it can
/// be hardened independently.
pub fn is_same_origin(target: &str, origin_host: &str) -> bool {
    target.contains(origin_host)
}
