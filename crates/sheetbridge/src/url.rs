//! Spreadsheet URL and key handling.

/// Placeholder for the document key in a URL template.
pub const KEY_PLACEHOLDER: &str = "{key}";

/// Build the canonical URL for a document key.
pub fn url_for_key(key: &str, template: &str) -> String {
    template.replace(KEY_PLACEHOLDER, key.trim())
}

/// Normalize user input to a spreadsheet URL.
///
/// Anything with a scheme is taken as a URL already; everything else is
/// treated as a document key.
pub fn canonical_url(input: &str, template: &str) -> String {
    let input = input.trim();
    if input.contains("://") {
        input.to_string()
    } else {
        url_for_key(input, template)
    }
}

/// Extract the document key from a `.../d/{key}/...` URL.
pub fn key_from_url(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("/d/")?;
    let key = rest
        .split(|c: char| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or_default();
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}
