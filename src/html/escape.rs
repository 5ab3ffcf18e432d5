//! Entity escaping for rendered markup, backed by `html-escape`.

use std::borrow::Cow;

/// Escape text content (`&`, `<`, `>`).
pub fn escape_text(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

/// Escape a value written between double quotes.
pub fn escape_attr(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}
