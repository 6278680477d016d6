//! Destination URL construction.
//!
//! `target` and `suffix` are joined as text before parsing, so a target that
//! already carries a query string (`https://h/app?x=1`) receives the suffix
//! after that query (`https://h/app?x=1/list`). This is kept as-is.

use url::Url;

use super::query::QueryParams;
use crate::error::GatewayError;

/// Build the outbound URL for `target + suffix`, then append `query`.
pub fn rewrite(target: &str, suffix: &str, query: &QueryParams) -> Result<Url, GatewayError> {
    let clean_target = target.strip_suffix('/').unwrap_or(target);
    let joined = format!("{clean_target}{suffix}");

    let mut url = Url::parse(&joined).map_err(|source| GatewayError::UrlConstruction {
        url: joined.clone(),
        source,
    })?;

    // Touching query_pairs_mut() with nothing to add would leave a bare '?'.
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in query.iter() {
            pairs.append_pair(name, value);
        }
    }

    Ok(url)
}
