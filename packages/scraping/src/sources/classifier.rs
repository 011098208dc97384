//! URL validation and source classification.

use url::Url;

use crate::error::ScrapeError;
use crate::sources::registry::{SourceDescriptor, SourceRegistry};

/// Parse and validate a scrape target URL.
///
/// Only http(s) URLs with a hostname are accepted; anything else is an
/// invalid target, reported as a value — no parse error escapes.
pub fn parse_target(raw: &str) -> Result<Url, ScrapeError> {
    let invalid = || ScrapeError::InvalidUrl {
        url: raw.to_string(),
    };

    let url = Url::parse(raw).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid());
    }
    Ok(url)
}

/// Classify a URL against the registry.
///
/// Returns the matched descriptor and the parsed URL, or the rejection
/// that ends the request (invalid URL, unsupported domain).
pub fn classify<'r>(
    registry: &'r SourceRegistry,
    raw: &str,
) -> Result<(&'r SourceDescriptor, Url), ScrapeError> {
    let url = parse_target(raw)?;
    let host = url.host_str().unwrap_or_default();

    match registry.find_by_host(host) {
        Some(descriptor) => Ok((descriptor, url)),
        None => Err(ScrapeError::UnsupportedSource {
            host: host.to_string(),
        }),
    }
}

/// Whether a URL string names a recognized source. Malformed input is
/// simply unsupported, never an error.
pub fn is_url_supported(registry: &SourceRegistry, raw: &str) -> bool {
    classify(registry, raw).is_ok()
}
