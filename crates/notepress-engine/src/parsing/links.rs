use url::Url;

use crate::limits::MIN_URL_LEN;

/// Sentinel targets the upstream research generator emits when it has
/// no real source for a citation. Linking to these would produce dead
/// `https://url_to_info/`-style links on the delivered page.
const PLACEHOLDER_TOKENS: &[&str] = &[
    "url_to_info",
    "url_to_source",
    "placeholder",
    "no_url",
    "none",
    "n/a",
    "unknown",
];

/// Validates and normalizes a link target.
///
/// Rejects empty and placeholder input, anything shorter than
/// [`MIN_URL_LEN`], and anything that does not end up as an absolute
/// `http`/`https` URL. Scheme-less input gets `https://` prepended
/// before parsing.
///
/// `None` means the caller keeps the label as plain text; a bad link
/// never fails a conversion.
pub fn clean_url(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().count() < MIN_URL_LEN {
        return None;
    }
    if PLACEHOLDER_TOKENS
        .iter()
        .any(|t| trimmed.eq_ignore_ascii_case(t))
    {
        return None;
    }

    let parsed = match Url::parse(trimmed) {
        Ok(url) => url,
        // Relative input: assume a bare host and retry.
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{trimmed}")).ok()?
        }
        Err(_) => return None,
    };

    match parsed.scheme() {
        "http" | "https" => Some(parsed),
        _ => None,
    }
}
