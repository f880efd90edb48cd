use crate::error::ValidationError;
use url::Url;

/// Scheme prepended to URLs that do not already start with `http`.
pub const DEFAULT_SCHEME_PREFIX: &str = "http://";

type Result<T> = std::result::Result<T, ValidationError>;

/// Validates a tiny URL identifier.
///
/// Only characters that survive URL query escaping unchanged are accepted:
/// `[a-zA-Z0-9]` and `-`, `_`, `.`, `~`.
pub fn validate_id(id: &str) -> Result<()> {
    if !id.chars().all(is_unreserved) {
        return Err(ValidationError::InvalidId(id.to_string()));
    }

    Ok(())
}

/// Validates that `url` parses as an absolute URL with a well-formed host.
///
/// Control characters and whitespace are rejected anywhere in the input,
/// since the URL parser would otherwise strip them silently.
pub fn validate_url(url: &str) -> Result<()> {
    if let Some(c) = url
        .chars()
        .find(|c| c.is_control() || c.is_whitespace())
    {
        return Err(ValidationError::InvalidUrl(format!(
            "{url:?}: invalid character {c:?} in url"
        )));
    }

    let parsed =
        Url::parse(url).map_err(|e| ValidationError::InvalidUrl(format!("{url}: {e}")))?;

    if let Some(host) = parsed.host_str() {
        if let Some(c) = host.chars().find(|c| !is_host_char(*c)) {
            return Err(ValidationError::InvalidUrl(format!(
                "{url}: illegal character '{c}' in host"
            )));
        }
    }

    Ok(())
}

/// Prepends `http://` when the URL does not start with `http`.
///
/// Both `http://` and `https://` URLs are returned unchanged.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{url}")
    }
}

fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')
}

// sub-delims, brackets for IPv6 literals and the port separator
fn is_host_char(c: char) -> bool {
    is_unreserved(c)
        || matches!(
            c,
            '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=' | ':' | '[' | ']'
        )
}
