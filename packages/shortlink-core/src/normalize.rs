//! URL normalization
//!
//! Ensures every stored URL carries a scheme. Inputs that already have one
//! are returned untouched, so `normalize_url` is idempotent.

use tracing::debug;
use url::{ParseError, Url};

/// Scheme applied to URLs typed without one.
pub const DEFAULT_SCHEME: &str = "http";

/// Normalize a user-supplied URL.
///
/// - `reddit.com` → `http://reddit.com`
/// - `//cdn.example.org/x` → `http://cdn.example.org/x`
/// - `localhost:8080/admin` → `http://localhost:8080/admin`
/// - `ftp://myserv.org/files` → unchanged
///
/// Input that cannot be parsed even after defaulting the scheme is passed
/// through (trimmed) rather than rejected.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();

    match Url::parse(trimmed) {
        Ok(parsed) if !is_host_port(&parsed) => return keep_or_serialize(trimmed, &parsed),
        // "host:port" parses as scheme "host" with an opaque numeric path
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => {}
        Err(err) => {
            debug!(url = trimmed, error = %err, "URL kept as-is: unparseable");
            return trimmed.to_string();
        }
    }

    let authority = trimmed.strip_prefix("//").unwrap_or(trimmed);
    let candidate = format!("{DEFAULT_SCHEME}://{authority}");
    match Url::parse(&candidate) {
        Ok(parsed) => keep_or_serialize(&candidate, &parsed),
        Err(err) => {
            debug!(url = trimmed, error = %err, "URL kept as-is: scheme default rejected");
            trimmed.to_string()
        }
    }
}

/// The parser silently drops tabs and newlines; keep the stored form free of
/// control characters so it stays usable as a `Location` header.
fn keep_or_serialize(input: &str, parsed: &Url) -> String {
    if input.chars().any(|c| c.is_ascii_control()) {
        parsed.as_str().to_string()
    } else {
        input.to_string()
    }
}

fn is_host_port(parsed: &Url) -> bool {
    if !parsed.cannot_be_a_base() {
        return false;
    }
    let port = parsed.path().split('/').next().unwrap_or("");
    !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())
}
