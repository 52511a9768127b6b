//! URL and path resolution for asset references.
//!
//! A page can be inlined from an `http(s)://` URL, a `file://` URL or a plain
//! filesystem path, so references are resolved against whichever of those the
//! base turns out to be.

use std::path::{Path, PathBuf};
use url::Url;

use crate::error::FetchError;

/// Schemes that are treated as absolute locations rather than paths
fn is_fetchable_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https" | "file")
}

/// Parse `raw` as an absolute URL the fetcher understands
fn parse_absolute(raw: &str) -> Option<Url> {
    Url::parse(raw).ok().filter(is_fetchable_scheme)
}

/// Check whether a reference is already an inline data URI
#[must_use]
pub fn is_data_uri(reference: &str) -> bool {
    reference
        .trim_start()
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Resolve a potentially relative reference against a base URL or path
///
/// Query strings of HTTP URLs are re-encoded, fixing references copied out of
/// HTML with unencoded special characters (e.g. Google Fonts URLs with `:`,
/// `,`, `@`, `;`) that some servers reject.
///
/// When the base is a filesystem path the reference is joined onto the base's
/// directory, with any query string or fragment dropped.
pub fn resolve_url(base: &str, reference: &str) -> Result<String, FetchError> {
    let reference = reference.trim();

    if let Some(absolute) = parse_absolute(reference) {
        return Ok(normalize_query(absolute).to_string());
    }

    match parse_absolute(base) {
        Some(base_url) => {
            let resolved = base_url
                .join(reference)
                .map_err(|e| FetchError::InvalidUrl {
                    base: base.to_string(),
                    reference: reference.to_string(),
                    message: e.to_string(),
                })?;
            Ok(normalize_query(resolved).to_string())
        }
        None if reference.starts_with("//") => {
            // Protocol-relative reference from a page loaded off disk
            let absolute =
                Url::parse(&format!("https:{reference}")).map_err(|e| FetchError::InvalidUrl {
                    base: base.to_string(),
                    reference: reference.to_string(),
                    message: e.to_string(),
                })?;
            Ok(normalize_query(absolute).to_string())
        }
        None => {
            let path_part = reference
                .split(['?', '#'])
                .next()
                .unwrap_or_default();
            let dir = Path::new(base).parent().unwrap_or_else(|| Path::new(""));
            Ok(dir.join(path_part).to_string_lossy().into_owned())
        }
    }
}

fn normalize_query(mut resolved: Url) -> Url {
    if !matches!(resolved.scheme(), "http" | "https") || resolved.query().is_none() {
        return resolved;
    }

    // Collect query pairs into owned strings to avoid borrow conflicts
    let query_pairs: Vec<(String, String)> = resolved
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    resolved.query_pairs_mut().clear();
    for (key, value) in query_pairs {
        resolved.query_pairs_mut().append_pair(&key, &value);
    }

    resolved
}

/// Map a location onto a local file, if it names one that exists
///
/// `file://` URLs are converted to paths; `http(s)://` URLs never touch the
/// filesystem; anything else is checked as a path.
pub async fn local_path(location: &str) -> Option<PathBuf> {
    let candidate = match Url::parse(location) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().ok()?,
        Ok(url) if matches!(url.scheme(), "http" | "https") => return None,
        _ => PathBuf::from(location),
    };

    match tokio::fs::metadata(&candidate).await {
        Ok(metadata) if metadata.is_file() => Some(candidate),
        _ => None,
    }
}
