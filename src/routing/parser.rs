//! Request path splitting.

use std::borrow::Cow;

use crate::error::GatewayError;

/// A proxied request path split into its route key and forwarding suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath<'a> {
    /// First path segment.
    pub key: &'a str,
    /// Remainder of the path, always starting with `/`.
    pub suffix: Cow<'a, str>,
}

/// Split `path` into `(key, suffix)`.
///
/// `/key/a/b` yields `("key", "/a/b")`, `/key` yields `("key", "/")`.
/// An empty first segment (`//a`, `/`) is rejected.
pub fn parse_path(path: &str) -> Result<ParsedPath<'_>, GatewayError> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    let key = rest.split('/').next().unwrap_or_default();

    if key.is_empty() {
        return Err(GatewayError::MissingKey);
    }

    let remainder = &rest[key.len()..];
    let suffix = if remainder.is_empty() {
        Cow::Borrowed("/")
    } else if remainder.starts_with('/') {
        Cow::Borrowed(remainder)
    } else {
        Cow::Owned(format!("/{remainder}"))
    };

    Ok(ParsedPath { key, suffix })
}
