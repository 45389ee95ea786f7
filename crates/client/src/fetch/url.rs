//! URL canonicalization and origin-relative resolution.

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize an absolute URL string.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host
/// 4. Remove fragment (#...)
/// 5. Keep query string intact (do not reorder)
pub fn canonicalize(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(mut host) = parsed.host_str() {
        let h = host.to_lowercase();
        host = h.as_str();
        parsed
            .set_host(Some(host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

/// Resolve a manifest path or absolute URL against the app origin.
///
/// Origin-relative paths ("/app.js") are joined onto the origin; anything
/// else is canonicalized as-is.
pub fn resolve(origin: &str, path_or_url: &str) -> Result<url::Url, UrlError> {
    if path_or_url.starts_with('/') {
        let base = canonicalize(origin)?;
        return base
            .join(path_or_url)
            .map_err(|e| UrlError::InvalidUrl(e.to_string()));
    }
    canonicalize(path_or_url)
}

/// Cache identity for a resolved URL.
///
/// Same-origin resources are keyed by path plus query, so a manifest path
/// populated at install time and a live absolute URL for the same resource
/// share one cache entry. Foreign-origin resources keep their full
/// canonical URL: two hosts serving the same path must never share bytes.
pub fn cache_identity(origin: &str, target: &url::Url) -> String {
    let same_origin = canonicalize(origin).is_ok_and(|base| {
        base.scheme() == target.scheme()
            && base.host_str() == target.host_str()
            && base.port_or_known_default() == target.port_or_known_default()
    });
    if !same_origin {
        return target.as_str().to_string();
    }
    match target.query() {
        Some(q) if !q.is_empty() => format!("{}?{}", target.path(), q),
        _ => target.path().to_string(),
    }
}
